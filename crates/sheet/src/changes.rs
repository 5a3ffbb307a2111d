use indexmap::IndexSet;

/// Columns present in the transformed header but absent from the
/// original header, by exact string equality.
///
/// Duplicates in the transformed header collapse to one entry; the
/// result keeps the transformed header's order. Used purely for
/// highlighting; it never gates the pipeline.
#[must_use]
pub fn added_columns(original: &[String], transformed: &[String]) -> IndexSet<String> {
    transformed
        .iter()
        .filter(|name| !original.contains(*name))
        .cloned()
        .collect()
}
