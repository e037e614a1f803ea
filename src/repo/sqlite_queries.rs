pub const QUERY_CREATE_TABLE_MESSAGE: &str = r#"
CREATE TABLE IF NOT EXISTS message (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    phone_number_id TEXT NOT NULL,
    sender TEXT NOT NULL,
    body TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    created_at DATETIME NOT NULL
);
"#;

pub const QUERY_CREATE_TABLE_USER_CONNECTION: &str = r#"
CREATE TABLE IF NOT EXISTS user_connection (
    user_id TEXT PRIMARY KEY NOT NULL,
    access_token TEXT NOT NULL,
    phone_number_id TEXT NOT NULL,
    waba_id TEXT NOT NULL,
    connected_at DATETIME NOT NULL
);
"#;

pub const QUERY_INSERT_MESSAGE: &str = r#"
INSERT INTO message(phone_number_id,sender,body,timestamp,created_at)
VALUES($1,$2,$3,$4,$5);
"#;

// timestamps are epoch seconds sent as strings, compare them as numbers
pub const QUERY_GET_MESSAGES_BY_PHONE_NUMBER_ID: &str = r#"
SELECT
    id,phone_number_id,sender,body,timestamp
FROM message
WHERE phone_number_id=$1
ORDER BY CAST(timestamp AS INTEGER) DESC, id DESC;
"#;

pub const QUERY_UPSERT_USER_CONNECTION: &str = r#"
INSERT INTO user_connection(user_id,access_token,phone_number_id,waba_id,connected_at)
VALUES($1,$2,$3,$4,$5)
ON CONFLICT(user_id) DO UPDATE SET
    access_token=excluded.access_token,
    phone_number_id=excluded.phone_number_id,
    waba_id=excluded.waba_id,
    connected_at=excluded.connected_at;
"#;

pub const QUERY_GET_USER_CONNECTION: &str = r#"
SELECT
    user_id,access_token,phone_number_id,waba_id,connected_at
FROM user_connection
WHERE user_id=$1;
"#;
