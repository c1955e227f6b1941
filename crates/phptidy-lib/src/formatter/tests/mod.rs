mod embedding;
mod resolution;
mod statements;
