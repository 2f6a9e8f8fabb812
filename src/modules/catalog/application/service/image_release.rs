use tracing::{debug, warn};

use crate::catalog::application::image_claims::ImageClaims;
use crate::catalog::application::ports::outgoing::{ImageStorage, ProductQuery};

/// Deletes `file` unless a product row still points at it.
///
/// The reference check and the unlink run under the exclusive claim, so an
/// upload that was handed this file cannot land its row in between.
/// Failures are logged and leave the file in place.
pub(crate) async fn release_image<Q: ProductQuery>(
    claims: &ImageClaims,
    query: &Q,
    images: &dyn ImageStorage,
    file: &str,
) {
    let _removal = claims.removal().await;

    match query.image_in_use(file).await {
        Ok(true) => debug!(file = %file, "Image still referenced, keeping file"),
        Ok(false) => {
            if let Err(e) = images.remove(file).await {
                warn!(file = %file, error = %e, "Failed to remove product image");
            }
        }
        Err(e) => {
            warn!(file = %file, error = %e, "Could not check image references, keeping file")
        }
    }
}
