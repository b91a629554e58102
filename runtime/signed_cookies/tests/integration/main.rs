mod plain;
mod size_limit;
