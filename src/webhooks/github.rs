use std::convert::Infallible;

use rocket::{
    request::{FromRequest, Outcome},
    Request, State,
};
use tracing::info;

use crate::relay::{InvocationContext, Relay};

mod events;
pub use events::issue_url;

mod payload;
use payload::RawPayload;

const X_GITHUB_EVENT: &str = "X-GitHub-Event";
const X_GITHUB_DELIVERY: &str = "X-GitHub-Delivery";

#[rocket::post("/api/webhooks/github", data = "<payload>")]
pub async fn github_webhook(
    context: InvocationContext,
    payload: RawPayload,
    relay: &State<Relay>,
) -> String {
    info!(
        "received event {} (delivery {}), {} bytes",
        context.event_kind().unwrap_or("unknown"),
        context.request_id(),
        payload.0.len()
    );

    relay.handle_payload(&payload.0, &context).await.to_string()
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for InvocationContext {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let header = |name: &str| request.headers().get_one(name).map(str::to_owned);

        Outcome::Success(InvocationContext::new(
            header(X_GITHUB_DELIVERY),
            header(X_GITHUB_EVENT),
        ))
    }
}
