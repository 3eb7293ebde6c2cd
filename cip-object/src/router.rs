//! Object trait and the permission-checked dispatch path

use crate::message::{MessageRouterRequest, MessageRouterResponse, ServiceCode};
use cip_core::CipResult;
use log::{debug, warn};

/// Interface every addressable CIP object implements
///
/// The object owns its attribute registry and performs the capability
/// check itself; the router only selects the handler for the requested
/// service and translates errors into response status codes.
#[async_trait::async_trait]
pub trait CipObject: Send + Sync {
    /// Class code of this object
    fn class_id(&self) -> u16;

    /// Instance number of this object
    fn instance_id(&self) -> u16;

    /// Read one attribute, permission-checked; returns the wire payload
    async fn get_attribute_single(&self, attribute_id: u16) -> CipResult<Vec<u8>>;

    /// Read all gettable-all attributes in ascending attribute order
    async fn get_attribute_all(&self) -> CipResult<Vec<u8>>;

    /// Write one attribute, permission-checked
    async fn set_attribute_single(&self, attribute_id: u16, data: &[u8]) -> CipResult<()>;
}

/// Route a request into an object and build the response
///
/// Every denial produces the specific failure status and a zero-length
/// payload; the reply service always carries the reply bit.
pub async fn dispatch(
    object: &dyn CipObject,
    request: &MessageRouterRequest,
) -> MessageRouterResponse {
    let result = match request.service {
        ServiceCode::GetAttributeSingle => {
            object.get_attribute_single(request.attribute_id).await
        }
        ServiceCode::GetAttributeAll => object.get_attribute_all().await,
        ServiceCode::SetAttributeSingle => object
            .set_attribute_single(request.attribute_id, &request.data)
            .await
            .map(|()| Vec::new()),
    };

    match result {
        Ok(data) => {
            debug!(
                "{} on class 0x{:02X} attribute {} ok, {} byte(s)",
                request.service,
                object.class_id(),
                request.attribute_id,
                data.len()
            );
            MessageRouterResponse::success(request.service, data)
        }
        Err(error) => {
            warn!(
                "{} on class 0x{:02X} attribute {} denied: {}",
                request.service,
                object.class_id(),
                request.attribute_id,
                error
            );
            MessageRouterResponse::error(request.service, &error)
        }
    }
}
