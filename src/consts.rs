pub const META_GRAPH_HOST: &str = "https://graph.facebook.com";
pub const META_GRAPH_API_VERSION: &str = "v22.0";
pub const META_OAUTH_DIALOG_URL: &str = "https://www.facebook.com/v22.0/dialog/oauth";

pub const META_OAUTH_SCOPES: [&str; 3] = [
    "whatsapp_business_management",
    "whatsapp_business_messaging",
    "business_management",
];

pub const WEBHOOK_SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

pub const LIVENESS_MSG: &str = "WhatsApp bridge is running";
