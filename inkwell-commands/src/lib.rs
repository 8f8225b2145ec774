pub mod prompts;
pub mod utility;

use inkwell_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    prompts::daily::META,
    prompts::random::META,
    prompts::submit::META,
    prompts::submissions::META,
    prompts::promptadd::META,
    prompts::promptedit::META,
    prompts::promptdelete::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        utility::usage::usage(),
        prompts::daily::daily(),
        prompts::random::random(),
        prompts::submit::submit(),
        prompts::submissions::submissions(),
        prompts::promptadd::promptadd(),
        prompts::promptedit::promptedit(),
        prompts::promptdelete::promptdelete(),
    ]
}
