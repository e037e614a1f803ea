use std::sync::LazyLock;
use tera::Tera;

pub const CONNECTED_TEMPLATE: &str = "auth/connected.html";

/// Templates are embedded so the binary doesn't depend on its working dir
pub static WEB_TEMPLATES: LazyLock<Tera> = LazyLock::new(|| {
    let mut tera = Tera::default();
    if let Err(e) = tera.add_raw_template(
        CONNECTED_TEMPLATE,
        include_str!("../../web/templates/auth/connected.html"),
    ) {
        logfire::error!("template couldnt be loaded: {error}", error = e.to_string());
    }
    tera
});
