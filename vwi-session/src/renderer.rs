//! Overlay renderer: turns slot state into Leaflet commands.
//!
//! The renderer remembers which tile layer is mounted for each slot and emits
//! only the difference against the desired state, so repeated reconciles
//! of unchanged state emit nothing.

use serde::Serialize;
use std::collections::BTreeMap;
use vwi_core::bounding_box::{BoundingBox, BoundingBoxFields};
use vwi_core::overlay::{OverlayKey, OverlaySlot, DEFAULT_ATTRIBUTION};

/// One side effect on the map, executed by the JS bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MapCommand {
    AddTileLayer {
        layer_id: String,
        url: String,
        attribution: String,
    },
    RemoveTileLayer {
        layer_id: String,
    },
    /// `[[south, west], [north, east]]`
    FitBounds {
        bounds: [[f64; 2]; 2],
    },
    OpenPopup {
        lat: f64,
        lng: f64,
        content: String,
    },
    ClosePopup,
    ClearDrawnShapes,
    Alert {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayRenderer {
    mounted: BTreeMap<OverlayKey, String>,
    fitted: Option<BoundingBox>,
}

impl OverlayRenderer {
    /// Bring mounted layers in line with `slots`.
    ///
    /// A slot whose visible URL changed has its old layer removed before the
    /// new one is added. Slots that did not change emit nothing.
    pub fn reconcile(
        &mut self,
        slots: &BTreeMap<OverlayKey, OverlaySlot>,
        attributions: &BTreeMap<OverlayKey, String>,
    ) -> Vec<MapCommand> {
        let mut commands = Vec::new();
        for key in OverlayKey::ALL {
            let desired = slots.get(&key).and_then(OverlaySlot::visible_url);
            let mounted = self.mounted.get(&key).map(String::as_str);
            if desired == mounted {
                continue;
            }
            if mounted.is_some() {
                self.mounted.remove(&key);
                commands.push(MapCommand::RemoveTileLayer {
                    layer_id: key.layer_id(),
                });
            }
            if let Some(url) = desired {
                self.mounted.insert(key, url.to_string());
                commands.push(MapCommand::AddTileLayer {
                    layer_id: key.layer_id(),
                    url: url.to_string(),
                    attribution: attributions
                        .get(&key)
                        .cloned()
                        .unwrap_or_else(|| DEFAULT_ATTRIBUTION.to_string()),
                });
            }
        }
        commands
    }

    /// Fit the viewport when all four bounds are set and differ from the last fit.
    pub fn fit(&mut self, fields: &BoundingBoxFields) -> Option<MapCommand> {
        let bbox = fields.complete()?;
        if self.fitted == Some(bbox) {
            return None;
        }
        self.fitted = Some(bbox);
        Some(MapCommand::FitBounds {
            bounds: bbox.leaflet_bounds(),
        })
    }

    /// Remove every mounted overlay and forget the last fit.
    pub fn reset(&mut self) -> Vec<MapCommand> {
        self.fitted = None;
        std::mem::take(&mut self.mounted)
            .into_keys()
            .map(|key| MapCommand::RemoveTileLayer {
                layer_id: key.layer_id(),
            })
            .collect()
    }

    pub fn mounted_url(&self, key: OverlayKey) -> Option<&str> {
        self.mounted.get(&key).map(String::as_str)
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vwi_core::index_type::IndexType;

    fn displayed(url: &str) -> OverlaySlot {
        OverlaySlot::Displayed {
            url: url.to_string(),
        }
    }

    #[test]
    fn test_replacing_a_slot_removes_then_adds() {
        let mut renderer = OverlayRenderer::default();
        let key = OverlayKey::Query;
        let mut slots = BTreeMap::from([(key, displayed("https://tiles/a"))]);
        let attributions = BTreeMap::new();

        let first = renderer.reconcile(&slots, &attributions);
        assert_eq!(first.len(), 1);

        slots.insert(key, displayed("https://tiles/b"));
        let second = renderer.reconcile(&slots, &attributions);
        assert_eq!(
            second,
            vec![
                MapCommand::RemoveTileLayer {
                    layer_id: "query".to_string()
                },
                MapCommand::AddTileLayer {
                    layer_id: "query".to_string(),
                    url: "https://tiles/b".to_string(),
                    attribution: DEFAULT_ATTRIBUTION.to_string(),
                },
            ]
        );
        assert!(renderer.reconcile(&slots, &attributions).is_empty());
    }

    #[test]
    fn test_loading_slot_keeps_layer_mounted() {
        let mut renderer = OverlayRenderer::default();
        let key = OverlayKey::Index(IndexType::Evi);
        let mut slots = BTreeMap::from([(key, displayed("https://tiles/evi"))]);
        renderer.reconcile(&slots, &BTreeMap::new());
        let loading = slots[&key].loading();
        slots.insert(key, loading);
        assert!(renderer.reconcile(&slots, &BTreeMap::new()).is_empty());
        assert_eq!(renderer.mounted_url(key), Some("https://tiles/evi"));
    }

    #[test]
    fn test_fit_is_idempotent() {
        let mut renderer = OverlayRenderer::default();
        let fields: BoundingBoxFields = "36.6,-1.44,37.1,-1.16"
            .parse::<BoundingBox>()
            .unwrap()
            .into();
        assert!(renderer.fit(&fields).is_some());
        assert!(renderer.fit(&fields).is_none());
        assert!(renderer.fit(&BoundingBoxFields::default()).is_none());
    }

    #[test]
    fn test_reset_removes_everything_once() {
        let mut renderer = OverlayRenderer::default();
        let slots = BTreeMap::from([
            (OverlayKey::Query, displayed("https://tiles/q")),
            (OverlayKey::Index(IndexType::Ndvi), displayed("https://tiles/n")),
        ]);
        renderer.reconcile(&slots, &BTreeMap::new());
        assert_eq!(renderer.reset().len(), 2);
        assert!(renderer.reset().is_empty());
        assert_eq!(renderer.mounted_count(), 0);
    }

    #[test]
    fn test_commands_serialize_with_op_tag() {
        let json = serde_json::to_value(MapCommand::RemoveTileLayer {
            layer_id: "ndvi".to_string(),
        })
        .unwrap();
        assert_eq!(json["op"], "remove_tile_layer");
        assert_eq!(json["layer_id"], "ndvi");
        let json = serde_json::to_value(MapCommand::ClosePopup).unwrap();
        assert_eq!(json["op"], "close_popup");
    }
}
