pub mod daily;
pub mod prompts;
pub mod submissions;
