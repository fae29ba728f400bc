use axum::routing::post;
use axum::Router;

use crate::handlers::candidate;
use crate::state::AppState;

/// Candidate routes, merged into `/api`.
///
/// ```text
/// POST   /candidate/offer-letter       get_offer_letter
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/candidate/offer-letter", post(candidate::get_offer_letter))
}
