//! Client details supplied by the transport at registration time.

/// Raw client details as reported by the caller's transport. The catalog
/// classifies the user agent into OS, browser, and device type before
/// storing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub user_agent: String,
    pub ip: String,
    pub screen_resolution: String,
    pub location: String,
}

impl ClientInfo {
    /// Placeholder details for transports that report nothing.
    pub fn unknown() -> Self {
        Self {
            user_agent: "Unknown".to_string(),
            ip: "Unknown".to_string(),
            screen_resolution: "Unknown".to_string(),
            location: "Unknown".to_string(),
        }
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Classification of a user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub os: &'static str,
    pub browser: &'static str,
    pub device_type: &'static str,
}

/// Classify a user-agent string into OS, browser, and device type.
///
/// Best-effort substring matching; anything unrecognized comes back as
/// `"Unknown"` with a `"desktop"` device type.
pub fn parse_user_agent(user_agent: &str) -> UserAgentInfo {
    let ua = user_agent.to_ascii_lowercase();

    let (os, device_type) = if ua.contains("android") {
        ("Android", "mobile")
    } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        ("iOS", "mobile")
    } else if ua.contains("linux") {
        ("Linux", "desktop")
    } else if ua.contains("macintosh") || ua.contains("mac os x") {
        ("Mac OS", "desktop")
    } else if ua.contains("windows") || ua.contains("win32") {
        ("Win32", "desktop")
    } else {
        ("Unknown", "desktop")
    };

    let browser = if ua.contains("edg") {
        "Edge"
    } else if ua.contains("chrome") {
        "Chrome"
    } else if ua.contains("firefox") {
        "Firefox"
    } else if ua.contains("safari") {
        "Safari"
    } else if ua.contains("msie") || ua.contains("trident") {
        "Internet Explorer"
    } else {
        "Unknown"
    };

    UserAgentInfo {
        os,
        browser,
        device_type,
    }
}
