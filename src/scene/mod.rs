/// Frame, object and history data model.
pub mod model;
