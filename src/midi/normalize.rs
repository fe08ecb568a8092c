/// Normalize a port name, id or manufacturer into the key used for matching.
///
/// Lower-cases the input, collapses every whitespace run into a single
/// hyphen and drops commas, so `"Mini  Keys, Pro"` becomes `"mini-keys-pro"`.
pub fn normalize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_whitespace = false;

    for ch in value.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if ch == ',' {
            continue;
        }
        out.extend(ch.to_lowercase());
    }

    out
}
