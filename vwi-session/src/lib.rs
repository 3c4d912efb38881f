//! Map interaction state machine for the vegetation/water index map.
//!
//! `MapSession` owns all view state: bounding box, drawn shape, date range,
//! selected index, overlay slots, point popup, notifications and the loading
//! indicator. Every operation returns [`Effects`]: map commands to execute
//! against the Leaflet bridge and at most one request to dispatch. Responses
//! come back through [`MapSession::resolve`], correlated by [`RequestId`].
//!
//! Nothing here touches the DOM or the network, so the whole state machine
//! runs in native unit tests.

pub mod events;
pub mod loading;
pub mod notification;
pub mod popup;
pub mod renderer;
pub mod session;

pub use events::MapEvent;
pub use loading::{LoadingTracker, RequestId};
pub use notification::{Level, Notification, Notifications};
pub use popup::{PointPopup, PointQueryResult, PopupContent};
pub use renderer::{MapCommand, OverlayRenderer};
pub use session::{
    DrawModal, Effects, MapSession, OverlayState, PendingRequest, RequestKind, Resolved,
};
