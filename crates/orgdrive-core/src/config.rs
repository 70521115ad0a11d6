//! Configuration module
//!
//! Environment-driven configuration for selecting and wiring a storage
//! backend. Upload limits and page sizes are fixed constants, not
//! configuration; see `constants`.

use std::env;

use crate::storage_types::StorageBackend;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .map(|s| s.parse::<StorageBackend>())
            .transpose()?;

        let config = Config {
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let backend = self.storage_backend.unwrap_or(StorageBackend::S3);
        match backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3_config() -> Config {
        Config {
            storage_backend: Some(StorageBackend::S3),
            s3_bucket: Some("drive".to_string()),
            s3_region: Some("eu-west-1".to_string()),
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: None,
            local_storage_base_url: None,
        }
    }

    #[test]
    fn test_validate_s3_requires_bucket_and_region() {
        assert!(s3_config().validate().is_ok());

        let mut missing_bucket = s3_config();
        missing_bucket.s3_bucket = None;
        assert!(missing_bucket.validate().is_err());

        let mut aws_region_only = s3_config();
        aws_region_only.s3_region = None;
        aws_region_only.aws_region = Some("us-east-1".to_string());
        assert!(aws_region_only.validate().is_ok());
    }

    #[test]
    fn test_validate_local_requires_path_and_url() {
        let config = Config {
            storage_backend: Some(StorageBackend::Local),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: Some("/var/lib/orgdrive".to_string()),
            local_storage_base_url: None,
        };
        assert!(config.validate().is_err());
    }
}
