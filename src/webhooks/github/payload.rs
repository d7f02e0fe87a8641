use std::io;

use rocket::{
    data::{ByteUnit, FromData, Outcome},
    http::{ContentType, Status},
    Data, Request,
};
use tracing::trace;

/// Request body of a GitHub webhook, kept as raw bytes.
///
/// Parsing is left to the relay, which reports a malformed event as an outcome instead of
/// rejecting the request.
pub struct RawPayload(pub Vec<u8>);

const LIMIT: ByteUnit = ByteUnit::Mebibyte(1);

#[rocket::async_trait]
impl<'r> FromData<'r> for RawPayload {
    type Error = io::Error;

    async fn from_data(request: &'r Request<'_>, data: Data<'r>) -> Outcome<'r, Self> {
        trace!("received payload on GitHub webhook endpoint: {:?}", request);

        if request.content_type() != Some(&ContentType::JSON) {
            trace!(
                "content type `{:?}` isn't json, reading it anyway",
                request.content_type()
            );
        }

        let size_limit = request.limits().get("json").unwrap_or(LIMIT);
        match data.open(size_limit).into_bytes().await {
            Ok(bytes) if bytes.is_complete() => Outcome::Success(RawPayload(bytes.into_inner())),
            Ok(_) => {
                let eof = io::ErrorKind::UnexpectedEof;
                trace!("payload was too big");
                Outcome::Error((
                    Status::PayloadTooLarge,
                    io::Error::new(eof, "data limit exceeded"),
                ))
            }
            Err(e) => Outcome::Error((Status::BadRequest, e)),
        }
    }
}
