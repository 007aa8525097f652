pub mod card_page;
pub mod card_form;
pub mod images;
pub mod index;
pub mod sse;
