//! Pop-up to opener token handoff page

use serde::Serialize;

/// Token payload posted to the opener window, never stored server-side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPayload {
    pub token: String,
    pub provider: String,
}

/// Handoff page template
///
/// `__HANDSHAKE__` and `__MESSAGE__` are JS string literals.
const HANDOFF_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Signing in</title>
</head>
<body>
<p id="status">Completing sign-in...</p>
<script>
(function() {
    var handshake = __HANDSHAKE__;
    var message = __MESSAGE__;
    if (!window.opener) {
        document.getElementById("status").textContent =
            "Sign-in complete. You can close this window.";
        return;
    }
    function receiveMessage(e) {
        if (e.data !== handshake) {
            return;
        }
        window.removeEventListener("message", receiveMessage, false);
        window.opener.postMessage(message, e.origin);
        window.close();
    }
    window.addEventListener("message", receiveMessage, false);
    window.opener.postMessage(handshake, "*");
})();
</script>
</body>
</html>
"#;

/// Build the page that hands the token to `window.opener` and closes the
/// pop-up
///
/// The pop-up announces itself with `authorizing:<provider>`. The opener
/// echoes that back, and only then is
/// `authorization:<provider>:success:<payload json>` posted, addressed to
/// the origin that answered.
pub fn handoff_html(payload: &TokenPayload) -> String {
    let payload_json = serde_json::json!({
        "token": payload.token,
        "provider": payload.provider,
    });
    let handshake = format!("authorizing:{}", payload.provider);
    let message = format!("authorization:{}:success:{}", payload.provider, payload_json);

    HANDOFF_TEMPLATE
        .replace("__HANDSHAKE__", &js_string(handshake))
        .replace("__MESSAGE__", &js_string(message))
}

fn js_string(value: String) -> String {
    script_safe(&serde_json::Value::String(value).to_string())
}

/// Escape a JSON literal so it cannot close the surrounding `<script>`
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
