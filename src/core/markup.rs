use regex::Regex;

/// 將信件內文的簡易標記轉成 HTML。
///
/// Ordered passes, each running on the previous pass's output. The order is
/// load-bearing: entities are escaped before any tag is emitted, and the
/// paired colour markers must be rewritten before the generic bold rule
/// because both use the same `**` delimiter.
pub fn convert(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }

    let text = escape_entities(source);
    let text = apply_inline_rules(&text);
    let segments = group_list_lines(&text);

    // 每一行（包含最後一行）補上換行標記
    let html: String = segments
        .into_iter()
        .map(|segment| format!("{}<br>", segment))
        .collect();

    // 清除緊鄰清單前後的換行標記，避免多出空行
    html.replace("<br><ul>", "<ul>").replace("</ul><br>", "</ul>")
}

fn escape_entities(text: &str) -> String {
    // & 必須最先逸出
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn apply_inline_rules(text: &str) -> String {
    let red = Regex::new(r"\*\*紅字\*\*(.*?)\*\*紅字\*\*").unwrap();
    let yellow = Regex::new(r"\*\*黃底\*\*(.*?)\*\*黃底\*\*").unwrap();
    let bold = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    let link = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();

    let text = red.replace_all(text, r#"<span style="color: red;">$1</span>"#);
    let text = yellow.replace_all(&text, r#"<span style="background-color: yellow;">$1</span>"#);
    let text = bold.replace_all(&text, "<strong>$1</strong>");
    link.replace_all(&text, r#"<a href="$2" target="_blank">$1</a>"#)
        .into_owned()
}

/// 將連續的項目行收進同一個 <ul>；被任一非項目行隔開就拆成兩個清單。
fn group_list_lines(text: &str) -> Vec<String> {
    // 條列符號：-、•、或小寫 l 後接空白
    let bullet = Regex::new(r"^[-•l]\s+(.*)$").unwrap();

    let mut segments: Vec<String> = Vec::new();
    let mut open_list: Option<String> = None;

    for line in text.split('\n') {
        if let Some(caps) = bullet.captures(line) {
            let item = format!("<li>{}</li>", &caps[1]);
            match open_list.as_mut() {
                Some(list) => list.push_str(&item),
                None => open_list = Some(format!("<ul>{}", item)),
            }
            continue;
        }
        if let Some(mut list) = open_list.take() {
            list.push_str("</ul>");
            segments.push(list);
        }
        segments.push(line.to_string());
    }
    if let Some(mut list) = open_list.take() {
        list.push_str("</ul>");
        segments.push(list);
    }

    segments
}
