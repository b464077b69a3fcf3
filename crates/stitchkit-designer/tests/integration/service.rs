use async_trait::async_trait;
use stitchkit_core::{Error, Layer, Point, Result, ServiceError};
use stitchkit_designer::{
    AppliqueOptions, AppliqueRequest, AppliqueResponse, GenerationOptions, LayerStore,
    LocalStitchService, SatinRequest, SatinResponse, StitchService,
};

/// A service whose transport always fails.
struct OfflineService;

#[async_trait]
impl StitchService for OfflineService {
    async fn generate_satin(&self, _request: SatinRequest) -> Result<SatinResponse> {
        Err(ServiceError::Unavailable.into())
    }

    async fn generate_applique(&self, _request: AppliqueRequest) -> Result<AppliqueResponse> {
        Err(ServiceError::Request {
            reason: "connection refused".to_string(),
        }
        .into())
    }
}

/// A service that answers with a truncated appliqué.
struct TruncatingService;

#[async_trait]
impl StitchService for TruncatingService {
    async fn generate_satin(&self, request: SatinRequest) -> Result<SatinResponse> {
        LocalStitchService::new().generate_satin(request).await
    }

    async fn generate_applique(&self, request: AppliqueRequest) -> Result<AppliqueResponse> {
        let mut response = LocalStitchService::new().generate_applique(request).await?;
        response.steps.truncate(2);
        Ok(response)
    }
}

fn store() -> LayerStore {
    LayerStore::from_layers(vec![Layer::with_id("patch", "Patch", "#ffffff").with_paths(
        vec![vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]],
    )])
}

#[tokio::test]
async fn test_local_satin_round_trip() {
    let service = LocalStitchService::new();
    let request = SatinRequest::new(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0)], 4.0, 0.4);
    let response = service.generate_satin(request).await.unwrap();
    assert_eq!(response.stitches.len(), 11);
}

#[tokio::test]
async fn test_local_satin_invalid_input() {
    let service = LocalStitchService::new();
    let request = SatinRequest::new(&[Point::new(0.0, 0.0)], 4.0, 0.4);
    let err = service.generate_satin(request).await.unwrap_err();
    assert!(err.is_invalid_input());
}

#[tokio::test]
async fn test_failed_service_leaves_store_untouched() {
    let store = store();
    let result = store.apply_applique("patch", 0, &OfflineService).await;
    assert!(matches!(result, Err(Error::Service(ServiceError::Request { .. }))));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_malformed_response_is_rejected() {
    let result = store().apply_applique("patch", 0, &TruncatingService).await;
    assert!(matches!(
        result,
        Err(Error::Service(ServiceError::MalformedResponse { .. }))
    ));
}

#[tokio::test]
async fn test_trait_object_service() {
    let service: Box<dyn StitchService> = Box::new(LocalStitchService::new());
    let updated = store()
        .apply_applique("patch", 0, service.as_ref())
        .await
        .unwrap();
    assert_eq!(updated.len(), 4);
}

#[tokio::test]
async fn test_applique_layers_survive_regeneration() {
    let service = LocalStitchService::with_applique_options(AppliqueOptions {
        satin_width: 2.0,
        ..AppliqueOptions::default()
    });
    let updated = store().apply_applique("patch", 0, &service).await.unwrap();

    let border = updated.layers().nth(3).unwrap().clone();
    let settings = border.settings.clone().unwrap();
    assert_eq!(settings.satin_width, Some(2.0));

    let mut regenerated = updated.clone();
    for _ in 0..2 {
        for layer in updated.layers().skip(1) {
            regenerated = regenerated
                .apply_stitch_generation(&layer.id, &GenerationOptions::default())
                .unwrap();
        }
    }
    for (before, after) in updated.layers().zip(regenerated.layers()).skip(1) {
        assert_eq!(before.paths, after.paths);
    }
    assert_eq!(regenerated.layer(&border.id).unwrap().point_count(), border.point_count());
}
