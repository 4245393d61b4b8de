/// Last path segment of a type name, used as a stage's log name.
///
/// `"stocksight_pipeline::components::ForecastSource"` becomes `"ForecastSource"`.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}

/// Stage name for `T`, as reported in pipeline logs.
pub fn stage_name<T: ?Sized>() -> &'static str {
    short_type_name(std::any::type_name::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_module_path() {
        assert_eq!(short_type_name("a::b::ForecastSource"), "ForecastSource");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn stage_name_of_local_type() {
        struct ReorderStage;
        assert_eq!(stage_name::<ReorderStage>(), "ReorderStage");
    }
}
