//! Background content loading.

use std::sync::Arc;

use tokio::sync::mpsc;

use certring_core::{CarouselConfig, ContentError, ContentSource, load_certificates};

use super::constants::LOAD_CHANNEL_SIZE;
use super::state::LoadResult;

/// Start loading certificates from `source` off the UI loop.
///
/// Returns a receiver that will receive exactly one result.
pub fn start_load(
    source: Arc<dyn ContentSource>,
    config: CarouselConfig,
) -> mpsc::Receiver<LoadResult> {
    let (tx, rx) = mpsc::channel(LOAD_CHANNEL_SIZE);

    tokio::spawn(async move {
        let _ = tx.send(load(source, config).await).await;
    });

    rx
}

async fn load(source: Arc<dyn ContentSource>, config: CarouselConfig) -> LoadResult {
    let source_name = source.describe();
    tracing::debug!(source = %source_name, "loading certificates");

    // File reads block, keep them off the event loop
    let result = match tokio::task::spawn_blocking(move || load_certificates(&*source, &config))
        .await
    {
        Ok(result) => result,
        Err(e) => Err(ContentError::Task {
            source_name,
            message: e.to_string(),
        }),
    };

    match result {
        Ok(certificates) => LoadResult::Loaded(certificates),
        Err(err) => LoadResult::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use certring_core::{BuiltinSource, Certificate};

    use super::*;

    struct PanickingSource;

    impl ContentSource for PanickingSource {
        fn describe(&self) -> String {
            "exploding".to_string()
        }

        fn fetch(&self) -> Result<Vec<Certificate>, ContentError> {
            panic!("loader crashed")
        }
    }

    #[tokio::test]
    async fn test_load_delivers_certificates() {
        let mut rx = start_load(Arc::new(BuiltinSource), CarouselConfig::default());
        match rx.recv().await {
            Some(LoadResult::Loaded(certs)) => assert_eq!(certs.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_crashed_loader_is_a_task_error() {
        let mut rx = start_load(Arc::new(PanickingSource), CarouselConfig::default());
        match rx.recv().await {
            Some(LoadResult::Failed(ContentError::Task { source_name, .. })) => {
                assert_eq!(source_name, "exploding");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
