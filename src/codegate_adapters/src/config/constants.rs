pub const CONFIG_FILE: &str = "config/base.json";
pub const ENV_PREFIX: &str = "CODEGATE";
pub const ENV_SEPARATOR: &str = "__";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT_MILLIS: u64 = 10_000;
    }
    pub mod verification {
        pub const TTL_SECONDS: u64 = 180;
        pub const MAX_ATTEMPTS: u32 = 5;
    }
    pub mod jwt {
        pub const ACCESS_TTL_SECONDS: i64 = 600;
        pub const REFRESH_TTL_SECONDS: i64 = 60 * 60 * 24 * 7;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
