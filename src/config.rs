use std::env;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    /// Browser origins allowed to call the API; `*` allows any.
    pub cors_origins: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub endpoint: Option<String>,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub bucket: String,
    pub public_url: String,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    fn get_env_or(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Comma separated list; blanks are dropped.
    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let db_url: String = Self::get_env("DATABASE_URL");

        EnvConfig {
            port: Self::get_env_or("PORT", "8000").parse().unwrap_or(8000),
            db_url,
            jwt: JwtConfig {
                secret: Self::get_env("JWT_SECRET"),
                ttl_minutes: Self::get_env_or("TOKEN_TTL_MINUTES", "30").parse().unwrap_or(30),
            },
            storage: StorageConfig {
                endpoint: env::var("S3_ENDPOINT_URL").ok(),
                access_key: Self::get_env("S3_ACCESS_KEY"),
                secret_key: Self::get_env("S3_SECRET_KEY"),
                region: Self::get_env_or("S3_REGION", "us-east-1"),
                bucket: Self::get_env_or("S3_BUCKET_NAME", "avatars"),
                public_url: Self::get_env_or("S3_PUBLIC_URL", "http://localhost:9000"),
            },
            cors_origins: Self::parse_origins(&Self::get_env_or("CORS_ALLOWED_ORIGINS", "*")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(EnvConfig::parse_origins("*"), vec!["*"]);
        assert_eq!(
            EnvConfig::parse_origins(" http://localhost:5173 , https://folio.example.com,,"),
            vec!["http://localhost:5173", "https://folio.example.com"]
        );
        assert!(EnvConfig::parse_origins("").is_empty());
    }
}
