pub fn default_max_iterations() -> u64 {
    100
}
