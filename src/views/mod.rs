//! Presentation helpers: view models, choice lists and validators for
//! table entry pages.

mod choices;
mod error;
mod forms;
mod kwargs;
mod record;
mod text;

pub use choices::{
    get_choices, get_validators, get_x_choices, validate_all, Choice, ChoiceFilter, LabelField,
    Validator,
};
pub use error::ViewError;
pub use forms::{build_form, validate_form, FormField, FormSpec};
pub use kwargs::{get_kwargs, table_listing, TableListing, ViewModel};
pub use record::{Record, Table};
pub use text::{plural, title_case};
