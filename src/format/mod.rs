//! Pure string transformations for patient fields.
//!
//! - [`mask`]: CPF and phone input masks
//! - [`date`]: birth date normalization and display
//!
//! Nothing here touches application state; every function is a plain
//! `&str -> String` style transform.

pub mod date;
pub mod mask;

pub use date::{
    classify_date, format_date_for_db, format_date_for_display, parse_plan_id, DateInput,
};
pub use mask::{digits_only, mask_cpf, mask_phone, CPF_DIGITS, PHONE_DIGITS};
