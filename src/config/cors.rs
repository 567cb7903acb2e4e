use tower_http::cors::{Any, CorsLayer};

/// The frontend is served from a different origin, so every route allows
/// cross-origin requests without restriction.
pub fn create_cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods(Any)
    .allow_headers(Any)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn create_cors_layer_does_not_panic() {
    let _layer = create_cors_layer();
  }
}
