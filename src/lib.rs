pub mod cli;
pub mod config;
pub mod pcm;
pub mod scope_panel;
pub mod time_axis;
pub mod tone;
