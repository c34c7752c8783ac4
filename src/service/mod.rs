//! CrudHelper: generic CRUD using the safe SQL builder.

mod helper;
pub use helper::CrudHelper;
