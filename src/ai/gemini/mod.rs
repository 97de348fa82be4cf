pub mod client;
pub mod letter;
pub mod types;

pub use client::GeminiHttpClient;
pub use letter::GeminiCoverLetterClient;
