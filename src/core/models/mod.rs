pub mod change_record;
pub mod observation;
pub mod user_lookup;
