use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::Client;

/// Build an `SdkConfig` for the given region.
///
/// Credentials resolve through the SDK default chain (environment,
/// shared config, instance metadata). The same config is shared by every
/// AWS client in the process.
pub async fn build_aws_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

/// Build an S3 client from a shared config.
pub fn s3_client(config: &SdkConfig) -> Client {
    Client::new(config)
}
