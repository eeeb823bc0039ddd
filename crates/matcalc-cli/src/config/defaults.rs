pub struct DefaultsConfig {
    pub change_working_directory: bool,
    pub setup_new_coline: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            change_working_directory: true,
            setup_new_coline: false,
        }
    }
}
