//! Injected overlay: the page-side half of the picker.
//!
//! The overlay assigns stable ids to elements, queues pointer and popup
//! events for Rust to drain, and applies the visual effects the state
//! machine orders (cursor, hover class, popup). It holds no interaction
//! logic of its own; every decision lives in [`crate::picker`].
//!
//! Every dynamic value interpolated into a script goes through
//! [`sanitize_js_string`] first.

use crate::i18n::{Locale, MessageKey};
use crate::picker::{popup::KIND_CHOICES, ElementId, Popup};

/// Class applied to the hovered element.
pub const HOVER_CLASS: &str = "magpie-hover";
/// Class of the popup container.
pub const POPUP_CLASS: &str = "magpie-popup";

/// One-time overlay bootstrap. Idempotent: a second evaluation is a no-op.
pub fn install_script() -> &'static str {
    r#"(() => {
        if (window.__magpie) return true;
        const st = {
            armed: false,
            nextId: 1,
            byId: new Map(),
            events: [],
            popup: null,
        };
        window.__magpie = st;
        st.idOf = (el) => {
            if (!el || el.nodeType !== 1) return 0;
            if (!el.__magpieId) {
                el.__magpieId = st.nextId++;
                st.byId.set(el.__magpieId, el);
            }
            return el.__magpieId;
        };
        const style = document.createElement('style');
        style.textContent =
            '.magpie-hover { outline: 2px solid #ff8c00 !important; }' +
            '.magpie-popup { position: fixed; z-index: 2147483647; background: #fff;' +
            ' border: 1px solid #888; border-radius: 4px; padding: 8px;' +
            ' box-shadow: 0 2px 8px rgba(0,0,0,0.25); display: flex; gap: 6px; }';
        document.head.appendChild(style);
        const insidePopup = (t) => !!(st.popup && st.popup.contains(t));
        document.addEventListener('mouseover', (e) => {
            if (!st.armed || insidePopup(e.target)) return;
            st.events.push({ type: 'hover', element: st.idOf(e.target), enter: true });
        }, true);
        document.addEventListener('mouseout', (e) => {
            if (!st.armed || insidePopup(e.target)) return;
            st.events.push({ type: 'hover', element: st.idOf(e.target), enter: false });
        }, true);
        document.addEventListener('click', (e) => {
            const inside = insidePopup(e.target);
            if (!st.armed && !st.popup) return;
            if (st.armed && !inside) {
                e.preventDefault();
                e.stopPropagation();
            }
            st.events.push({
                type: 'click',
                element: st.idOf(e.target),
                x: e.clientX,
                y: e.clientY,
                inside_popup: inside,
            });
        }, true);
        return true;
    })()"#
}

/// Drain and return the queued overlay events.
pub fn drain_events_script() -> &'static str {
    r#"(() => {
        const st = window.__magpie;
        if (!st) return [];
        const events = st.events;
        st.events = [];
        return events;
    })()"#
}

/// Set the cursor and the overlay's armed flag together.
pub fn set_cursor_script(crosshair: bool) -> String {
    format!(
        r#"(() => {{
            const st = window.__magpie;
            if (!st) return false;
            st.armed = {crosshair};
            document.body.style.cursor = {crosshair} ? 'crosshair' : 'default';
            return true;
        }})()"#
    )
}

/// Add or remove the hover class on one element.
pub fn set_hover_script(element: ElementId, on: bool) -> String {
    let method = if on { "add" } else { "remove" };
    format!(
        r#"(() => {{
            const st = window.__magpie;
            if (!st) return false;
            const el = st.byId.get({element});
            if (!el) return false;
            el.classList.{method}('{HOVER_CLASS}');
            return true;
        }})()"#
    )
}

/// Render the options popup at the anchor point, disposing any prior one.
pub fn show_popup_script(popup: &Popup, locale: Locale) -> String {
    let mut options = String::new();
    for (i, choice) in KIND_CHOICES.iter().enumerate() {
        let selected = if i == 0 { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            choice.value,
            selected,
            choice.label_text(locale),
        ));
    }
    let html = format!(
        r#"<select>{}</select><input type="text" placeholder="{}" style="display:none;"><button>{}</button>"#,
        options,
        locale.message(MessageKey::EnterProperty),
        locale.message(MessageKey::Extract),
    );
    format!(
        r#"(() => {{
            const st = window.__magpie;
            if (!st) return false;
            if (st.popup) {{ st.popup.remove(); st.popup = null; }}
            const popup = document.createElement('div');
            popup.className = '{POPUP_CLASS}';
            popup.style.left = '{x}px';
            popup.style.top = '{y}px';
            popup.innerHTML = '{html}';
            document.body.appendChild(popup);
            st.popup = popup;
            const select = popup.querySelector('select');
            const input = popup.querySelector('input');
            const button = popup.querySelector('button');
            select.addEventListener('change', () => {{
                input.style.display = select.value === 'custom' ? 'block' : 'none';
            }});
            button.addEventListener('click', (e) => {{
                e.stopPropagation();
                st.events.push({{ type: 'commit', choice: select.value, custom: input.value }});
            }});
            return true;
        }})()"#,
        x = popup.x,
        y = popup.y,
        html = sanitize_js_string(&html),
    )
}

/// Dispose the popup if present.
pub fn close_popup_script() -> &'static str {
    r#"(() => {
        const st = window.__magpie;
        if (st && st.popup) { st.popup.remove(); st.popup = null; return true; }
        return false;
    })()"#
}

/// Blocking acknowledgment. The evaluation resolves when the user
/// dismisses the dialog.
pub fn alert_script(message: &str) -> String {
    format!("alert('{}')", sanitize_js_string(message))
}

/// Snapshot an element the overlay knows by id.
pub fn capture_script(element: ElementId, custom: Option<&str>) -> String {
    format!(
        r#"(() => {{
            const st = window.__magpie;
            if (!st) return null;
            const el = st.byId.get({element});
            if (!el) return null;
            {body}
        }})()"#,
        body = capture_body(custom),
    )
}

/// Snapshot the first element matching a CSS selector. Used by the
/// non-interactive grab path; needs no overlay state.
pub fn capture_by_selector_script(selector: &str, custom: Option<&str>) -> String {
    format!(
        r#"(() => {{
            const el = document.querySelector('{selector}');
            if (!el) return null;
            {body}
        }})()"#,
        selector = sanitize_js_string(selector),
        body = capture_body(custom),
    )
}

/// Shared capture body: text, markup, the fixed property set, the optional
/// custom property, computed background-image, and the cell grid for table
/// elements. Expects `el` in scope.
fn capture_body(custom: Option<&str>) -> String {
    let custom_grab = match custom {
        Some(name) if !name.is_empty() => format!("grab('{}');", sanitize_js_string(name)),
        _ => String::new(),
    };
    format!(
        r#"const props = {{}};
            const grab = (name) => {{
                const v = el[name];
                if (v !== undefined && v !== null && v !== '') props[name] = String(v);
            }};
            grab('value');
            grab('src');
            grab('href');
            {custom_grab}
            let table = null;
            if (el.rows !== undefined) {{
                table = Array.from(el.rows).map((r) =>
                    Array.from(r.cells).map((c) => c.innerText));
            }}
            return {{
                text: el.outerText || '',
                markup: el.outerHTML || '',
                properties: props,
                background_image: getComputedStyle(el).backgroundImage || null,
                table: table,
            }};"#
    )
}

/// Sanitize a string for safe injection into a JavaScript string literal.
///
/// Escapes everything that could break out of the string context:
/// backslashes, quotes, backticks, newlines, and angle brackets (so a
/// reflected value can never form a `</script>` tag). Null bytes are
/// stripped.
pub fn sanitize_js_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '"' => result.push_str("\\\""),
            '`' => result.push_str("\\`"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\0' => {}
            '<' => result.push_str("\\x3c"),
            '>' => result.push_str("\\x3e"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_basic() {
        assert_eq!(sanitize_js_string("hello"), "hello");
        assert_eq!(sanitize_js_string("it's"), "it\\'s");
        assert_eq!(sanitize_js_string("a\"b"), "a\\\"b");
        assert_eq!(sanitize_js_string("a\0b"), "ab");
    }

    #[test]
    fn test_sanitize_script_breakout() {
        let sanitized = sanitize_js_string("</script><script>alert(1)</script>");
        assert!(!sanitized.contains("</script>"));
    }

    #[test]
    fn test_popup_script_lists_all_choices() {
        let script = show_popup_script(&Popup::at(10.0, 20.0), Locale::En);
        for choice in KIND_CHOICES {
            assert!(script.contains(choice.value), "missing {}", choice.value);
        }
        assert!(script.contains("'10px'"));
        assert!(script.contains("'20px'"));
    }

    #[test]
    fn test_capture_script_custom_property_is_sanitized() {
        let script = capture_script(5, Some("tag'Name"));
        assert!(script.contains(r"grab('tag\'Name')"));
        let plain = capture_script(5, None);
        assert!(!plain.contains("grab('')"));
    }

    #[test]
    fn test_selector_capture_is_sanitized() {
        let script = capture_by_selector_script("a[href='x']", None);
        assert!(script.contains(r"querySelector('a[href=\'x\']')"));
    }

    #[test]
    fn test_alert_script_quotes_message() {
        assert_eq!(alert_script("Copied"), "alert('Copied')");
        assert_eq!(alert_script("it's"), "alert('it\\'s')");
    }

    #[test]
    fn test_hover_script_add_and_remove() {
        assert!(set_hover_script(3, true).contains(".add('magpie-hover')"));
        assert!(set_hover_script(3, false).contains(".remove('magpie-hover')"));
    }
}
