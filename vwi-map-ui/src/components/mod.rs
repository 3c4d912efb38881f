//! Reusable Dioxus RSX components for the index map app.

mod bounding_box_fields;
mod date_range_picker;
mod draw_modal;
mod index_selector;
mod landing;
mod legend_panel;
mod loading_spinner;
mod map_container;
mod map_controls;
mod notification_stack;
mod place_search;

pub use bounding_box_fields::BoundingBoxFieldsView;
pub use date_range_picker::DateRangePicker;
pub use draw_modal::DrawModalDialog;
pub use index_selector::IndexSelector;
pub use landing::Landing;
pub use legend_panel::LegendPanel;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
pub use map_controls::MapControls;
pub use notification_stack::NotificationStack;
pub use place_search::PlaceSearch;
