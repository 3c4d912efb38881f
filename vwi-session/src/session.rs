//! The map view state machine.

use log::{error, info, warn};
use std::collections::BTreeMap;
use vwi_core::bounding_box::{BoundingBox, BoundingBoxFields};
use vwi_core::date_range::{DateDraft, DateRange};
use vwi_core::error::{QueryError, ValidationError};
use vwi_core::index_type::IndexType;
use vwi_core::overlay::{IndexOverlay, IndexRange, Legend, OverlayKey, OverlaySlot};
use vwi_core::shape::{DrawEvent, DrawnShape, LatLng};
use vwi_core::wire::{
    AreaQueryRequest, BboxQueryRequest, PointQueryRequest, QueryOutcome, QueryRequest,
};

use crate::loading::{LoadingTracker, RequestId};
use crate::notification::{Level, Notifications};
use crate::popup::{PointPopup, PopupContent};
use crate::renderer::{MapCommand, OverlayRenderer};

pub const PLACE_NOT_FOUND: &str = "Place not found.";
pub const NO_IMAGERY: &str = "No imagery available for the selected date range.";
pub const MISSING_DATE_RANGE: &str = "Select a start and end date before querying a point.";

/// What the UI has to send over the network.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    Query(QueryRequest),
    Geocode { place: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub id: RequestId,
    pub kind: RequestKind,
}

/// A successful response, matching the `RequestKind` that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Query(QueryOutcome),
    Geocode(Option<BoundingBox>),
}

/// Side effects of one session operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Effects {
    pub commands: Vec<MapCommand>,
    pub request: Option<PendingRequest>,
}

impl Effects {
    fn with_commands(commands: Vec<MapCommand>) -> Self {
        Self {
            commands,
            request: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.request.is_none()
    }
}

/// Where a response lands once it resolves.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    Slot(OverlayKey),
    Popup,
    Geocode,
}

/// Date/index confirmation shown after a shape is drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawModal {
    pub dates: DateDraft,
    pub index: IndexType,
}

/// Overlay slots plus the legend of the most recent result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayState {
    slots: BTreeMap<OverlayKey, OverlaySlot>,
    attributions: BTreeMap<OverlayKey, String>,
    pub legend_key: Option<OverlayKey>,
    pub legend: Legend,
    pub range: Option<IndexRange>,
    pub palette: Vec<String>,
}

impl OverlayState {
    pub fn slot(&self, key: OverlayKey) -> &OverlaySlot {
        static ABSENT: OverlaySlot = OverlaySlot::Absent;
        self.slots.get(&key).unwrap_or(&ABSENT)
    }

    pub fn all_absent(&self) -> bool {
        self.slots.values().all(OverlaySlot::is_absent)
    }

    pub fn displayed(&self) -> impl Iterator<Item = (OverlayKey, &str)> {
        self.slots
            .iter()
            .filter_map(|(key, slot)| slot.visible_url().map(|url| (*key, url)))
    }

    fn set(&mut self, key: OverlayKey, slot: OverlaySlot) {
        self.slots.insert(key, slot);
    }

    fn apply(&mut self, key: OverlayKey, overlay: IndexOverlay) {
        self.slots.insert(
            key,
            OverlaySlot::Displayed {
                url: overlay.tile_url,
            },
        );
        self.attributions.insert(key, overlay.attribution);
        self.legend_key = Some(key);
        self.legend = overlay.legend;
        self.range = overlay.range;
        self.palette = overlay.palette;
    }
}

/// All state of the map view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapSession {
    pub bbox: BoundingBoxFields,
    pub selected_area: Option<DrawnShape>,
    pub dates: DateDraft,
    pub index: IndexType,
    pub modal: Option<DrawModal>,
    pub overlays: OverlayState,
    pub popup: Option<PointPopup>,
    pub notifications: Notifications,
    renderer: OverlayRenderer,
    loading: LoadingTracker,
    in_flight: BTreeMap<RequestId, Target>,
}

impl MapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    pub fn dismiss_notification(&mut self, id: u64) {
        self.notifications.dismiss(id);
    }

    fn reject(&mut self, err: ValidationError) {
        info!("Rejected input: {}", err);
        self.notifications.push(Level::Warning, err.to_string());
    }

    fn dispatch(&mut self, target: Target, kind: RequestKind) -> PendingRequest {
        let id = self.loading.begin();
        self.in_flight.insert(id, target);
        info!("Dispatching request {} for {:?}", id, target);
        PendingRequest { id, kind }
    }

    /// Validate a place name before geocoding it.
    pub fn lookup_place(&mut self, place: &str) -> Effects {
        let place = place.trim();
        if place.is_empty() {
            self.reject(ValidationError::EmptyPlace);
            return Effects::default();
        }
        let request = self.dispatch(
            Target::Geocode,
            RequestKind::Geocode {
                place: place.to_string(),
            },
        );
        Effects {
            commands: Vec::new(),
            request: Some(request),
        }
    }

    pub fn set_start_date(&mut self, value: &str) {
        if let Err(err) = self.dates.set_start(value) {
            self.reject(err);
        }
    }

    pub fn set_end_date(&mut self, value: &str) {
        if let Err(err) = self.dates.set_end(value) {
            self.reject(err);
        }
    }

    pub fn set_index(&mut self, index: IndexType) {
        self.index = index;
    }

    /// Request the selected index over the bounding box.
    pub fn submit_bbox_query(&mut self) -> Effects {
        let range = match self.dates.range() {
            Ok(range) => range,
            Err(err) => {
                self.reject(err);
                return Effects::default();
            }
        };
        let Some(bbox) = self.bbox.complete() else {
            self.reject(ValidationError::IncompleteBoundingBox);
            return Effects::default();
        };
        let key = OverlayKey::Query;
        let loading = self.overlays.slot(key).loading();
        self.overlays.set(key, loading);
        let body = BboxQueryRequest::new(&bbox, &range, self.index);
        let request = self.dispatch(Target::Slot(key), RequestKind::Query(QueryRequest::Bbox(body)));
        Effects {
            commands: Vec::new(),
            request: Some(request),
        }
    }

    /// A shape was drawn. Store it and open the confirmation modal.
    pub fn shape_drawn(&mut self, event: DrawEvent) -> Effects {
        match DrawnShape::try_from(event) {
            Ok(shape) => {
                info!("Shape drawn with {} vertices", shape.vertex_count());
                self.selected_area = Some(shape);
                self.modal = Some(DrawModal {
                    dates: self.dates.clone(),
                    index: self.index,
                });
                Effects::default()
            }
            Err(err) => {
                self.reject(err);
                Effects::with_commands(vec![MapCommand::ClearDrawnShapes])
            }
        }
    }

    pub fn modal_set_start(&mut self, value: &str) {
        let result = match self.modal.as_mut() {
            Some(modal) => modal.dates.set_start(value),
            None => return,
        };
        if let Err(err) = result {
            self.reject(err);
        }
    }

    pub fn modal_set_end(&mut self, value: &str) {
        let result = match self.modal.as_mut() {
            Some(modal) => modal.dates.set_end(value),
            None => return,
        };
        if let Err(err) = result {
            self.reject(err);
        }
    }

    pub fn modal_set_index(&mut self, index: IndexType) {
        if let Some(modal) = self.modal.as_mut() {
            modal.index = index;
        }
    }

    /// Confirm the modal and query the drawn shape.
    ///
    /// The modal's dates and index become the session's selection. A polygon
    /// is sent as an area query, a point opens a value popup.
    pub fn confirm_modal(&mut self) -> Effects {
        let Some(modal) = self.modal.clone() else {
            return Effects::default();
        };
        let Some(shape) = self.selected_area.clone() else {
            self.modal = None;
            return Effects::default();
        };
        let range = match modal.dates.range() {
            Ok(range) => range,
            Err(err) => {
                self.reject(err);
                return Effects::default();
            }
        };
        self.modal = None;
        self.dates = modal.dates;
        self.index = modal.index;

        match shape {
            DrawnShape::Polygon(vertices) => {
                let key = OverlayKey::Index(modal.index);
                let loading = self.overlays.slot(key).loading();
                self.overlays.set(key, loading);
                let body = AreaQueryRequest::new(&vertices, &range, modal.index);
                let request =
                    self.dispatch(Target::Slot(key), RequestKind::Query(QueryRequest::Area(body)));
                Effects {
                    commands: Vec::new(),
                    request: Some(request),
                }
            }
            DrawnShape::Point(at) => self.query_point(at, range),
        }
    }

    /// Discard the drawn shape and close the modal.
    pub fn cancel_modal(&mut self) -> Effects {
        if self.modal.take().is_none() && self.selected_area.is_none() {
            return Effects::default();
        }
        self.selected_area = None;
        Effects::with_commands(vec![MapCommand::ClearDrawnShapes])
    }

    /// Map click: query the index value under the cursor.
    pub fn map_clicked(&mut self, at: LatLng) -> Effects {
        match self.dates.range() {
            Ok(range) => self.query_point(at, range),
            Err(_) => {
                self.notifications.push(Level::Warning, MISSING_DATE_RANGE);
                Effects::default()
            }
        }
    }

    fn query_point(&mut self, at: LatLng, range: DateRange) -> Effects {
        let index = self.index;
        let request = self.dispatch(
            Target::Popup,
            RequestKind::Query(QueryRequest::Point {
                body: PointQueryRequest::new(at, &range),
                index,
            }),
        );
        let popup = PointPopup {
            request: request.id,
            at,
            index,
            content: PopupContent::Loading,
        };
        let open = MapCommand::OpenPopup {
            lat: at.lat,
            lng: at.lng,
            content: popup.text(),
        };
        self.popup = Some(popup);
        Effects {
            commands: vec![open],
            request: Some(request),
        }
    }

    pub fn close_popup(&mut self) -> Effects {
        match self.popup.take() {
            Some(_) => Effects::with_commands(vec![MapCommand::ClosePopup]),
            None => Effects::default(),
        }
    }

    /// Return every slot to absent and drop all selection state.
    ///
    /// Requests still in flight are forgotten; their responses are ignored.
    /// Notifications and the request id counter survive.
    pub fn clear_map(&mut self) -> Effects {
        let mut commands = self.renderer.reset();
        commands.push(MapCommand::ClosePopup);
        commands.push(MapCommand::ClearDrawnShapes);

        let notifications = std::mem::take(&mut self.notifications);
        let mut loading = std::mem::take(&mut self.loading);
        loading.reset();
        *self = MapSession {
            notifications,
            loading,
            ..MapSession::default()
        };
        info!("Map cleared");
        Effects::with_commands(commands)
    }

    /// Apply the result of a dispatched request.
    ///
    /// Responses are applied in the order they arrive, so a later
    /// resolution overwrites an earlier one for the same slot.
    pub fn resolve(&mut self, id: RequestId, outcome: Result<Resolved, QueryError>) -> Effects {
        let Some(target) = self.in_flight.remove(&id) else {
            warn!("Ignoring response for unknown or cleared request {}", id);
            return Effects::default();
        };
        self.loading.finish(id);

        match (target, outcome) {
            (Target::Slot(key), Ok(Resolved::Query(QueryOutcome::Overlay(overlay)))) => {
                info!("Request {} resolved: {} -> {}", id, key, overlay.tile_url);
                self.overlays.apply(key, overlay);
                self.notifications
                    .push(Level::Success, format!("{} overlay loaded.", key));
                Effects::with_commands(self.render())
            }
            (Target::Slot(key), result) => {
                let err = unexpected(result);
                if !self.slot_has_pending(key) {
                    let reverted = self.overlays.slot(key).reverted();
                    self.overlays.set(key, reverted);
                }
                self.report(&err, &format!("{} data", key));
                Effects::with_commands(self.render())
            }
            (Target::Popup, result) => self.resolve_popup(id, result),
            (Target::Geocode, Ok(Resolved::Geocode(Some(bbox)))) => {
                info!("Geocoded to {:?}", bbox.coordinates());
                self.bbox = bbox.into();
                Effects::with_commands(self.renderer.fit(&self.bbox).into_iter().collect())
            }
            (Target::Geocode, Ok(Resolved::Geocode(None))) => {
                info!("Geocoder returned no results");
                Effects::with_commands(vec![MapCommand::Alert {
                    message: PLACE_NOT_FOUND.to_string(),
                }])
            }
            (Target::Geocode, result) => {
                let err = unexpected(result);
                error!("Error in geocoding: {}", err);
                self.notifications.push(
                    Level::Error,
                    "Could not look up that place. Please try again.",
                );
                Effects::default()
            }
        }
    }

    fn resolve_popup(&mut self, id: RequestId, result: Result<Resolved, QueryError>) -> Effects {
        let Some(popup) = self.popup.as_mut().filter(|p| p.request == id) else {
            info!("Popup for request {} was closed or replaced", id);
            return Effects::default();
        };
        match result {
            Ok(Resolved::Query(QueryOutcome::PointValue(value))) => {
                popup.content = value.map_or(PopupContent::NoData, PopupContent::Value);
                let open = MapCommand::OpenPopup {
                    lat: popup.at.lat,
                    lng: popup.at.lng,
                    content: popup.text(),
                };
                Effects::with_commands(vec![open])
            }
            other => {
                let err = unexpected(other);
                self.popup = None;
                self.report(&err, "point value");
                Effects::with_commands(vec![MapCommand::ClosePopup])
            }
        }
    }

    fn slot_has_pending(&self, key: OverlayKey) -> bool {
        self.in_flight.values().any(|t| *t == Target::Slot(key))
    }

    fn render(&mut self) -> Vec<MapCommand> {
        self.renderer
            .reconcile(&self.overlays.slots, &self.overlays.attributions)
    }

    fn report(&mut self, err: &QueryError, what: &str) {
        if err.is_not_found() {
            self.notifications.push(Level::Warning, NO_IMAGERY);
        } else {
            error!("Error fetching {}: {}", what, err);
            self.notifications.push(
                Level::Error,
                format!("Failed to fetch {}. Please try again.", what),
            );
        }
    }
}

/// Turn a mismatched or failed outcome into an error.
fn unexpected(result: Result<Resolved, QueryError>) -> QueryError {
    match result {
        Err(err) => err,
        Ok(other) => QueryError::Decode(format!("unexpected response {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polygon_event() -> DrawEvent {
        DrawEvent::Polygon {
            latlngs: vec![
                LatLng::new(-1.0, 36.0),
                LatLng::new(-1.0, 37.0),
                LatLng::new(-2.0, 37.0),
                LatLng::new(-2.0, 36.0),
            ],
        }
    }

    fn nairobi() -> BoundingBox {
        "36.6647016,-1.4448822,37.1048735,-1.1606749".parse().unwrap()
    }

    fn session_with_dates() -> MapSession {
        let mut session = MapSession::new();
        session.set_start_date("2023-01-01");
        session.set_end_date("2023-06-01");
        session
    }

    fn overlay(url: &str) -> Resolved {
        Resolved::Query(QueryOutcome::Overlay(IndexOverlay {
            tile_url: url.to_string(),
            legend: Legend::default(),
            range: None,
            palette: Vec::new(),
            attribution: "Google Earth Engine".to_string(),
        }))
    }

    fn area_response(index: IndexType, body: &str) -> Resolved {
        let request = QueryRequest::Area(AreaQueryRequest::new(
            &[],
            &DateRange::parse("2023-01-01", "2023-06-01").unwrap(),
            index,
        ));
        Resolved::Query(request.decode(body).unwrap())
    }

    /// Draw a polygon, confirm it for `index`, and return the pending request.
    fn query_area(session: &mut MapSession, index: IndexType) -> PendingRequest {
        session.shape_drawn(polygon_event());
        session.modal_set_index(index);
        session.confirm_modal().request.unwrap()
    }

    fn added_urls(effects: &Effects) -> Vec<String> {
        effects
            .commands
            .iter()
            .filter_map(|c| match c {
                MapCommand::AddTileLayer { url, .. } => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn unordered_dates_never_dispatch() {
        let pairs = [
            ("2023-06-01", "2023-01-01"),
            ("2023-01-01", "2023-01-01"),
            ("2024-02-29", "2024-02-28"),
        ];
        for (start, end) in pairs {
            let mut session = MapSession::new();
            session.bbox = nairobi().into();
            session.set_start_date(start);
            session.set_end_date(end);
            assert!(session.submit_bbox_query().request.is_none());
            assert_eq!(session.in_flight_count(), 0);

            session.shape_drawn(polygon_event());
            session.modal_set_start(start);
            session.modal_set_end(end);
            assert!(session.confirm_modal().request.is_none());
            assert!(session.modal.is_some(), "modal stays open after rejection");
            assert_eq!(session.in_flight_count(), 0);
        }
    }

    #[test]
    fn modal_rejects_empty_dates() {
        let mut session = MapSession::new();
        session.shape_drawn(polygon_event());
        let effects = session.confirm_modal();
        assert!(effects.request.is_none());
        assert_eq!(
            session.notifications.last().unwrap().message,
            ValidationError::MissingDates.to_string()
        );
    }

    #[test]
    fn modal_discards_unordered_edit() {
        let mut session = session_with_dates();
        session.shape_drawn(polygon_event());
        session.modal_set_end("2022-12-01");
        let modal = session.modal.as_ref().unwrap();
        assert_eq!(modal.dates.end, "2023-06-01");
        assert_eq!(
            session.notifications.last().unwrap().level,
            Level::Warning
        );
    }

    #[test]
    fn cancel_modal_discards_selection() {
        let mut session = session_with_dates();
        session.shape_drawn(polygon_event());
        assert!(session.selected_area.is_some());
        let effects = session.cancel_modal();
        assert_eq!(effects.commands, vec![MapCommand::ClearDrawnShapes]);
        assert!(effects.request.is_none());
        assert!(session.selected_area.is_none());
        assert!(session.modal.is_none());
        assert!(session.overlays.all_absent());
    }

    #[test]
    fn bbox_query_replaces_previous_overlay() {
        let mut session = session_with_dates();
        session.bbox = nairobi().into();

        let first = session.submit_bbox_query().request.unwrap();
        let RequestKind::Query(QueryRequest::Bbox(body)) = &first.kind else {
            panic!("expected bbox request");
        };
        assert_eq!(body.start_date, "2023-01-01");
        assert!(session.overlays.slot(OverlayKey::Query).is_loading());

        let effects = session.resolve(first.id, Ok(overlay("https://tiles/a")));
        assert_eq!(added_urls(&effects), vec!["https://tiles/a"]);

        let second = session.submit_bbox_query().request.unwrap();
        let effects = session.resolve(second.id, Ok(overlay("https://tiles/b")));
        assert_eq!(
            effects.commands[0],
            MapCommand::RemoveTileLayer {
                layer_id: "query".to_string()
            }
        );
        assert_eq!(added_urls(&effects), vec!["https://tiles/b"]);
        assert_eq!(
            session.overlays.slot(OverlayKey::Query).visible_url(),
            Some("https://tiles/b")
        );
    }

    #[test]
    fn bbox_query_requires_bounds() {
        let mut session = session_with_dates();
        assert!(session.submit_bbox_query().request.is_none());
        assert_eq!(
            session.notifications.last().unwrap().message,
            ValidationError::IncompleteBoundingBox.to_string()
        );
    }

    #[test]
    fn polygon_query_displays_layer_and_legend() {
        let mut session = session_with_dates();
        let pending = query_area(&mut session, IndexType::Ndvi);
        let RequestKind::Query(QueryRequest::Area(body)) = &pending.kind else {
            panic!("expected area request");
        };
        assert_eq!(body.coordinates.len(), 4);
        assert_eq!(body.index, IndexType::Ndvi);

        let response = area_response(
            IndexType::Ndvi,
            r##"{"ndvi_tile_url": "https://tiles/x",
                "legend": {"NDVI": {"#00ff00": "dense"}},
                "index_range": {"NDVI": {"NDVI_min": -0.1, "NDVI_max": 0.8}}}"##,
        );
        let effects = session.resolve(pending.id, Ok(response));

        assert_eq!(added_urls(&effects), vec!["https://tiles/x"]);
        assert_eq!(
            session
                .overlays
                .slot(OverlayKey::Index(IndexType::Ndvi))
                .visible_url(),
            Some("https://tiles/x")
        );
        let entries = session.overlays.legend.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].color, "#00ff00");
        assert_eq!(entries[0].description, "dense");
        assert_eq!(session.overlays.range, Some(IndexRange { min: -0.1, max: 0.8 }));
        assert!(!session.is_loading());
    }

    #[test]
    fn other_index_slots_are_untouched() {
        let mut session = session_with_dates();
        let ndvi = query_area(&mut session, IndexType::Ndvi);
        session.resolve(ndvi.id, Ok(overlay("https://tiles/ndvi")));

        let ndwi = query_area(&mut session, IndexType::Ndwi);
        let effects = session.resolve(ndwi.id, Ok(overlay("https://tiles/ndwi")));

        assert!(!effects
            .commands
            .iter()
            .any(|c| matches!(c, MapCommand::RemoveTileLayer { .. })));
        assert_eq!(
            session
                .overlays
                .slot(OverlayKey::Index(IndexType::Ndvi))
                .visible_url(),
            Some("https://tiles/ndvi")
        );
        assert_eq!(session.overlays.displayed().count(), 2);

        let ndvi_again = query_area(&mut session, IndexType::Ndvi);
        let effects = session.resolve(ndvi_again.id, Ok(overlay("https://tiles/ndvi2")));
        assert_eq!(
            effects.commands[0],
            MapCommand::RemoveTileLayer {
                layer_id: "ndvi".to_string()
            }
        );
        assert_eq!(
            session
                .overlays
                .slot(OverlayKey::Index(IndexType::Ndwi))
                .visible_url(),
            Some("https://tiles/ndwi")
        );
    }

    #[test]
    fn not_found_keeps_previous_overlay() {
        let mut session = session_with_dates();
        session.bbox = nairobi().into();
        let first = session.submit_bbox_query().request.unwrap();
        session.resolve(first.id, Ok(overlay("https://tiles/a")));

        let second = session.submit_bbox_query().request.unwrap();
        assert!(session.is_loading());
        let effects = session.resolve(second.id, Err(QueryError::NotFound));

        assert!(effects.commands.is_empty());
        assert!(!session.is_loading());
        assert_eq!(
            session.overlays.slot(OverlayKey::Query),
            &OverlaySlot::Displayed {
                url: "https://tiles/a".to_string()
            }
        );
        assert_eq!(session.notifications.last().unwrap().message, NO_IMAGERY);
    }

    #[test]
    fn transport_error_is_generic() {
        let mut session = session_with_dates();
        let pending = query_area(&mut session, IndexType::Evi);
        session.resolve(
            pending.id,
            Err(QueryError::Transport("connection refused".to_string())),
        );
        let last = session.notifications.last().unwrap();
        assert_eq!(last.level, Level::Error);
        assert!(!last.message.contains("connection refused"));
        assert!(session.overlays.all_absent());
    }

    #[test]
    fn later_resolution_wins() {
        let mut session = session_with_dates();
        session.bbox = nairobi().into();
        let first = session.submit_bbox_query().request.unwrap();
        let second = session.submit_bbox_query().request.unwrap();

        session.resolve(second.id, Ok(overlay("https://tiles/second")));
        assert!(!session.is_loading());
        session.resolve(first.id, Ok(overlay("https://tiles/first")));
        assert_eq!(
            session.overlays.slot(OverlayKey::Query).visible_url(),
            Some("https://tiles/first")
        );
    }

    #[test]
    fn loading_follows_latest_request() {
        let mut session = session_with_dates();
        session.bbox = nairobi().into();
        let first = session.submit_bbox_query().request.unwrap();
        let second = session.submit_bbox_query().request.unwrap();
        session.resolve(first.id, Err(QueryError::Status(500)));
        assert!(session.is_loading());
        assert!(
            session.overlays.slot(OverlayKey::Query).is_loading(),
            "slot stays loading while another request targets it"
        );
        session.resolve(second.id, Ok(overlay("https://tiles/b")));
        assert!(!session.is_loading());
    }

    #[test]
    fn map_click_without_dates_sends_nothing() {
        let mut session = MapSession::new();
        let effects = session.map_clicked(LatLng::new(-1.29, 36.82));
        assert!(effects.is_empty());
        assert_eq!(session.in_flight_count(), 0);
        assert_eq!(
            session.notifications.last().unwrap().message,
            MISSING_DATE_RANGE
        );
        assert!(session.popup.is_none());
    }

    #[test]
    fn map_click_opens_loading_popup_then_value() {
        let mut session = session_with_dates();
        session.set_index(IndexType::Evi);
        let effects = session.map_clicked(LatLng::new(-1.29, 36.82));
        assert_eq!(
            effects.commands,
            vec![MapCommand::OpenPopup {
                lat: -1.29,
                lng: 36.82,
                content: "Loading...".to_string()
            }]
        );
        let pending = effects.request.unwrap();
        let RequestKind::Query(QueryRequest::Point { body, index }) = &pending.kind else {
            panic!("expected point request");
        };
        assert_eq!(*index, IndexType::Evi);
        assert_eq!(body.end_date, "2023-06-01");

        let effects = session.resolve(
            pending.id,
            Ok(Resolved::Query(QueryOutcome::PointValue(Some(0.4567)))),
        );
        assert_eq!(
            effects.commands,
            vec![MapCommand::OpenPopup {
                lat: -1.29,
                lng: 36.82,
                content: "EVI: 0.46".to_string()
            }]
        );
        let result = session.popup.as_ref().unwrap().result().unwrap();
        assert_eq!(result.value, 0.4567);
    }

    #[test]
    fn closed_popup_ignores_late_value() {
        let mut session = session_with_dates();
        let pending = session
            .map_clicked(LatLng::new(-1.29, 36.82))
            .request
            .unwrap();
        assert_eq!(
            session.close_popup().commands,
            vec![MapCommand::ClosePopup]
        );
        let effects = session.resolve(
            pending.id,
            Ok(Resolved::Query(QueryOutcome::PointValue(Some(0.3)))),
        );
        assert!(effects.is_empty());
        assert!(session.popup.is_none());
    }

    #[test]
    fn drawn_point_queries_value() {
        let mut session = session_with_dates();
        session.shape_drawn(DrawEvent::Marker {
            latlng: LatLng::new(-1.3, 36.8),
        });
        let effects = session.confirm_modal();
        assert!(matches!(
            effects.request.unwrap().kind,
            RequestKind::Query(QueryRequest::Point { .. })
        ));
        assert!(session.popup.is_some());
        assert!(session.overlays.all_absent());
    }

    #[test]
    fn point_not_found_closes_popup_with_warning() {
        let mut session = session_with_dates();
        let pending = session
            .map_clicked(LatLng::new(-1.29, 36.82))
            .request
            .unwrap();
        let effects = session.resolve(pending.id, Err(QueryError::NotFound));
        assert_eq!(effects.commands, vec![MapCommand::ClosePopup]);
        assert!(effects.request.is_none());
        assert!(session.popup.is_none());
        let last = session.notifications.last().unwrap();
        assert_eq!(last.level, Level::Warning);
        assert_eq!(last.message, NO_IMAGERY);
        assert!(!session.is_loading());
    }

    #[test]
    fn point_server_error_closes_popup_generically() {
        let mut session = session_with_dates();
        let pending = session
            .map_clicked(LatLng::new(-1.29, 36.82))
            .request
            .unwrap();
        let effects = session.resolve(pending.id, Err(QueryError::Status(500)));
        assert_eq!(effects.commands, vec![MapCommand::ClosePopup]);
        assert!(session.popup.is_none());
        let last = session.notifications.last().unwrap();
        assert_eq!(last.level, Level::Error);
        assert_eq!(last.message, "Failed to fetch point value. Please try again.");
        assert!(session.overlays.all_absent());
    }

    #[test]
    fn geocode_transport_error_keeps_bounds() {
        let mut session = MapSession::new();
        session.bbox = nairobi().into();
        let pending = session.lookup_place("Mombasa").request.unwrap();
        let effects = session.resolve(
            pending.id,
            Err(QueryError::Transport("connection refused".to_string())),
        );
        assert!(effects.is_empty());
        assert_eq!(session.bbox.complete(), Some(nairobi()));
        let last = session.notifications.last().unwrap();
        assert_eq!(last.level, Level::Error);
        assert_eq!(last.message, "Could not look up that place. Please try again.");
        assert!(!session.is_loading());
    }

    #[test]
    fn rejected_date_edit_bumps_revision() {
        let mut session = session_with_dates();
        let before = session.dates.rejected_edits();
        session.set_end_date("2022-12-01");
        assert_eq!(session.dates.end, "2023-06-01");
        assert_eq!(session.dates.rejected_edits(), before + 1);

        session.shape_drawn(polygon_event());
        session.modal_set_start("2023-07-01");
        let modal = session.modal.as_ref().unwrap();
        assert_eq!(modal.dates.start, "2023-01-01");
        assert_eq!(modal.dates.rejected_edits(), before + 2);
    }

    #[test]
    fn geocode_fills_bounds_and_fits() {
        let mut session = MapSession::new();
        let pending = session.lookup_place("Nairobi").request.unwrap();
        assert_eq!(
            pending.kind,
            RequestKind::Geocode {
                place: "Nairobi".to_string()
            }
        );
        let effects = session.resolve(pending.id, Ok(Resolved::Geocode(Some(nairobi()))));
        assert_eq!(session.bbox.complete(), Some(nairobi()));
        assert!(matches!(
            effects.commands.as_slice(),
            [MapCommand::FitBounds { .. }]
        ));

        // same bounds again: no refit
        let pending = session.lookup_place("Nairobi").request.unwrap();
        let effects = session.resolve(pending.id, Ok(Resolved::Geocode(Some(nairobi()))));
        assert!(effects.commands.is_empty());
    }

    #[test]
    fn geocode_empty_result_alerts_and_keeps_bounds() {
        let mut session = MapSession::new();
        let before = session.bbox;
        let pending = session.lookup_place("Nairobi").request.unwrap();
        let effects = session.resolve(pending.id, Ok(Resolved::Geocode(None)));
        assert_eq!(
            effects.commands,
            vec![MapCommand::Alert {
                message: PLACE_NOT_FOUND.to_string()
            }]
        );
        assert_eq!(session.bbox, before);
    }

    #[test]
    fn empty_place_is_rejected() {
        let mut session = MapSession::new();
        assert!(session.lookup_place("   ").is_empty());
        assert_eq!(session.in_flight_count(), 0);
    }

    #[test]
    fn clear_map_is_idempotent() {
        let mut session = session_with_dates();
        session.bbox = nairobi().into();
        let bbox = session.submit_bbox_query().request.unwrap();
        session.resolve(bbox.id, Ok(overlay("https://tiles/q")));
        let area = query_area(&mut session, IndexType::Mndwi);
        session.resolve(area.id, Ok(overlay("https://tiles/m")));
        session.map_clicked(LatLng::new(-1.5, 36.5));

        let first = session.clear_map();
        let removed = first
            .commands
            .iter()
            .filter(|c| matches!(c, MapCommand::RemoveTileLayer { .. }))
            .count();
        assert_eq!(removed, 2);
        assert!(session.overlays.all_absent());
        assert!(session.popup.is_none());
        assert!(session.selected_area.is_none());
        assert!(session.bbox.is_blank());
        assert!(!session.is_loading());

        let once = session.clone();
        let second = session.clear_map();
        assert_eq!(session, once);
        assert!(!second
            .commands
            .iter()
            .any(|c| matches!(c, MapCommand::RemoveTileLayer { .. })));
    }

    #[test]
    fn responses_after_clear_are_ignored() {
        let mut session = session_with_dates();
        let pending = query_area(&mut session, IndexType::Ndvi);
        session.clear_map();
        let effects = session.resolve(pending.id, Ok(overlay("https://tiles/late")));
        assert!(effects.is_empty());
        assert!(session.overlays.all_absent());
    }

    #[test]
    fn invalid_drawn_shape_is_removed() {
        let mut session = MapSession::new();
        let effects = session.shape_drawn(DrawEvent::Polygon {
            latlngs: vec![LatLng::new(0.0, 0.0)],
        });
        assert_eq!(effects.commands, vec![MapCommand::ClearDrawnShapes]);
        assert!(session.modal.is_none());
    }
}
