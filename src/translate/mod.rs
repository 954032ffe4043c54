//! Translation: one `Translator` contract with an upstream adapter (Google)
//! and a client for the relay's own REST endpoint, plus the wire messages
//! of the REST and socket transports.

pub mod google;
pub mod messages;
pub mod relay;
pub mod translator;

pub use google::GoogleTranslator;
pub use messages::{
    ErrorResponse, SocketFrame, TranslateMessage, TranslateReply, TranslateRequest,
    TranslateResponse, TranslatedText,
};
pub use relay::RelayClient;
pub use translator::{TranslateError, Translator};
