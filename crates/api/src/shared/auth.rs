use crate::error::MedlyError;
use actix_web::HttpRequest;
use medly_infra::MedlyContext;

pub const TRIGGER_KEY_HEADER: &str = "medly-trigger-key";

/// Protects the dispatch trigger route: the external scheduler has to
/// present the configured secret before it can start a run.
pub fn protect_trigger_route(
    http_req: &HttpRequest,
    ctx: &MedlyContext,
) -> Result<(), MedlyError> {
    match http_req
        .headers()
        .get(TRIGGER_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        Some(key) if key == ctx.config.trigger_secret => Ok(()),
        Some(_) => Err(MedlyError::Unauthorized(
            "Invalid trigger key provided".into(),
        )),
        None => Err(MedlyError::Unauthorized(format!(
            "Missing `{}` header",
            TRIGGER_KEY_HEADER
        ))),
    }
}
