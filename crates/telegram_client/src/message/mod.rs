mod message_data;
mod message_data_builder;

pub use message_data::{MessageData, MessageLink};
pub use message_data_builder::{escape_html, MessageDataBuilder};
