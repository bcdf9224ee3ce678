use base64::Config;

fn lenient_decode(input: &str, config: Config) -> Option<String> {
    let trimmed = input.trim().trim_end_matches('=');
    let raw = base64::decode_config(trimmed, config.decode_allow_trailing_bits(true)).ok()?;
    String::from_utf8(raw).ok()
}

/// Decodes standard-alphabet base64, tolerating missing padding.
pub fn std_base64_decode_string(input: &str) -> Option<String> {
    lenient_decode(input, base64::STANDARD_NO_PAD)
}

/// Decodes url-safe base64, tolerating missing padding.
pub fn urlsafe_base64_decode_string(input: &str) -> Option<String> {
    lenient_decode(input, base64::URL_SAFE_NO_PAD)
}

pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
