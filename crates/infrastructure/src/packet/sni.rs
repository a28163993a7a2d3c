const HTTP_METHODS: &[&[u8]] = &[b"GET ", b"POST ", b"HEAD ", b"PUT ", b"OPTIONS "];

/// Extracts the Host/SNI value from a payload per the fixed-shape rule: an
/// HTTP request line followed by a case-insensitive `host:` header, or a
/// TLS ClientHello's `server_name` extension. Returns `None` for anything
/// else.
pub fn extract_host(payload: &[u8]) -> Option<String> {
    if let Some(host) = extract_http_host(payload) {
        return Some(host);
    }
    extract_tls_sni(payload)
}

fn extract_http_host(payload: &[u8]) -> Option<String> {
    if !HTTP_METHODS.iter().any(|m| payload.starts_with(m)) {
        return None;
    }

    let text = String::from_utf8_lossy(payload);
    for line in text.split("\r\n") {
        if line.len() >= 5 && line[..5].eq_ignore_ascii_case("host:") {
            let value = line[5..].trim();
            let host = value.split(':').next().unwrap_or(value);
            return Some(host.to_lowercase());
        }
    }
    None
}

/// Walks a TLS ClientHello record: record header (5 bytes), handshake
/// header (4 bytes), protocol version + random (2 + 32 bytes), session ID,
/// cipher suites, compression methods, then the extensions block. Locates
/// extension type `0x0000` (server_name) and returns its first `host_name`
/// entry (name type `0`).
fn extract_tls_sni(payload: &[u8]) -> Option<String> {
    if payload.len() < 6 || payload[0] != 0x16 {
        return None;
    }
    if payload[5] != 0x01 {
        return None;
    }

    let mut pos = 5 + 4; // record header + handshake header
    pos += 2; // client_version
    pos += 32; // random

    let session_id_len = *payload.get(pos)? as usize;
    pos += 1 + session_id_len;

    let cipher_suites_len = u16::from_be_bytes([*payload.get(pos)?, *payload.get(pos + 1)?]) as usize;
    pos += 2 + cipher_suites_len;

    let compression_len = *payload.get(pos)? as usize;
    pos += 1 + compression_len;

    if pos + 2 > payload.len() {
        return None;
    }
    let extensions_len = u16::from_be_bytes([payload[pos], payload[pos + 1]]) as usize;
    pos += 2;
    let extensions_end = (pos + extensions_len).min(payload.len());

    while pos + 4 <= extensions_end {
        let ext_type = u16::from_be_bytes([payload[pos], payload[pos + 1]]);
        let ext_len = u16::from_be_bytes([payload[pos + 2], payload[pos + 3]]) as usize;
        let ext_start = pos + 4;
        let ext_end = (ext_start + ext_len).min(extensions_end);

        if ext_type == 0x0000 {
            return parse_server_name_extension(&payload[ext_start..ext_end]);
        }

        pos = ext_end;
    }

    None
}

fn parse_server_name_extension(ext: &[u8]) -> Option<String> {
    if ext.len() < 2 {
        return None;
    }
    let list_len = u16::from_be_bytes([ext[0], ext[1]]) as usize;
    let mut pos = 2;
    let end = (2 + list_len).min(ext.len());

    while pos + 3 <= end {
        let name_type = ext[pos];
        let name_len = u16::from_be_bytes([ext[pos + 1], ext[pos + 2]]) as usize;
        let name_start = pos + 3;
        let name_end = (name_start + name_len).min(end);

        if name_type == 0 {
            return std::str::from_utf8(&ext[name_start..name_end])
                .ok()
                .map(|s| s.to_lowercase());
        }
        pos = name_end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_http_host_header() {
        let payload = b"GET /index.html HTTP/1.1\r\nHost: www.Example.com:8080\r\nUser-Agent: test\r\n\r\n";
        assert_eq!(extract_host(payload), Some("www.example.com".to_string()));
    }

    #[test]
    fn ignores_non_http_non_tls_payload() {
        let payload = b"not a protocol at all";
        assert_eq!(extract_host(payload), None);
    }

    fn build_client_hello(sni: &str) -> Vec<u8> {
        let mut server_name_entry = vec![0u8]; // name_type = host_name
        server_name_entry.extend_from_slice(&(sni.len() as u16).to_be_bytes());
        server_name_entry.extend_from_slice(sni.as_bytes());

        let mut server_name_list = (server_name_entry.len() as u16).to_be_bytes().to_vec();
        server_name_list.extend_from_slice(&server_name_entry);

        let mut extension = vec![0x00, 0x00]; // extension type 0 (server_name)
        extension.extend_from_slice(&(server_name_list.len() as u16).to_be_bytes());
        extension.extend_from_slice(&server_name_list);

        let mut handshake_body = vec![0x03, 0x03]; // client_version
        handshake_body.extend_from_slice(&[0u8; 32]); // random
        handshake_body.push(0); // session id len = 0
        handshake_body.extend_from_slice(&[0x00, 0x02, 0x13, 0x01]); // cipher suites
        handshake_body.push(1); // compression methods len
        handshake_body.push(0); // null compression
        handshake_body.extend_from_slice(&(extension.len() as u16).to_be_bytes());
        handshake_body.extend_from_slice(&extension);

        let mut handshake = vec![0x01]; // handshake type: client_hello
        handshake.extend_from_slice(&[
            ((handshake_body.len() >> 16) & 0xff) as u8,
            ((handshake_body.len() >> 8) & 0xff) as u8,
            (handshake_body.len() & 0xff) as u8,
        ]);
        handshake.extend_from_slice(&handshake_body);

        let mut record = vec![0x16, 0x03, 0x01];
        record.extend_from_slice(&(handshake.len() as u16).to_be_bytes());
        record.extend_from_slice(&handshake);
        record
    }

    #[test]
    fn extracts_tls_sni() {
        let record = build_client_hello("video.youtube.com");
        assert_eq!(extract_host(&record), Some("video.youtube.com".to_string()));
    }
}
