mod cli;
mod rewrite;
