//! Health endpoint tests.

use crate::common::TestEnv;

/// Tests health endpoints.
#[tokio::test]
async fn test_health_endpoints() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    for path in ["/health", "/health/live", "/health/ready"] {
        let response = env.client.get(env.url(path)).send().await?;
        assert!(
            response.status().is_success(),
            "{path} should return success"
        );
    }

    let body: serde_json::Value = env.client.get(env.url("/health")).send().await?.json().await?;
    assert_eq!(body["status"], "healthy");

    Ok(())
}
