pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("username cannot be empty".to_string());
    }
    if username.len() > 64 {
        return Err("username cannot exceed 64 characters".to_string());
    }
    Ok(())
}

pub fn validate_app_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("application name cannot be empty".to_string());
    }
    if name.len() > 200 {
        return Err("application name cannot exceed 200 characters".to_string());
    }
    Ok(())
}

pub fn validate_mac(mac: &str) -> Result<(), String> {
    if mac.len() != 17 {
        return Err(format!("invalid MAC address: {mac}"));
    }
    let sep = if mac.contains(':') {
        ':'
    } else if mac.contains('-') {
        '-'
    } else {
        return Err(format!("invalid MAC address: {mac}"));
    };
    let parts: Vec<&str> = mac.split(sep).collect();
    if parts.len() != 6 || !parts
        .iter()
        .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
    {
        return Err(format!("invalid MAC address: {mac}"));
    }
    Ok(())
}
