pub mod landing;
pub mod responses;
pub mod router;
pub mod state;
pub mod templates;
pub mod uploads;

pub use responses::{ApiMessage, json_error};
pub use state::AppState;
pub use templates::{PageLayout, escape_html, render_footer, render_page};
pub use uploads::{FileFieldConfig, process_upload_form};
