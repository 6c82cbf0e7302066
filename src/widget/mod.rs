pub mod file_picker;
pub mod overlay;
pub mod page_view;
pub mod pixel_canvas;
pub mod toolbar;

pub use file_picker::{FilePicker, PickerOutcome};
pub use overlay::RectangleOverlay;
pub use page_view::{PageViewer, Presentation};
pub use pixel_canvas::PixelCanvas;
pub use toolbar::{Toolbar, ToolbarAction};
