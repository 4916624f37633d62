use crate::core::resolver::{format_roc, resolve_deadline};
use crate::domain::model::{HolidayCalendar, RenderedEmail, TemplatePair};
use crate::domain::ports::SettingsProvider;

/// 依月份選擇模板：12 月用年末模板，其餘用一般模板。
pub fn select_templates(settings: &dyn SettingsProvider, month: u32) -> TemplatePair {
    TemplatePair {
        subject: settings.subject_template(month).to_string(),
        body: settings.body_template(month).to_string(),
    }
}

/// 將模板中的代換記號換成計算結果。
///
/// Tokens are literal, non-overlapping, and replaced everywhere they occur;
/// unknown tokens pass through verbatim, and empty template text renders
/// empty. Whether an empty subject/body blocks sending is the dispatcher's
/// call, not the renderer's. `None` only for a calendar-invalid
/// (year, month).
pub fn render(
    templates: &TemplatePair,
    year: i32,
    month: u32,
    calendar: &HolidayCalendar,
) -> Option<RenderedEmail> {
    let deadline = resolve_deadline(year, month, calendar)?;
    let roc_year = year - 1911;

    let substitute = |text: &str| {
        let mut out = text.replace("{{rocYear}}", &roc_year.to_string());
        out = out.replace("{{currentMonth}}", &month.to_string());
        out = out.replace("{{nextRocYear}}", &(roc_year + 1).to_string());
        out.replace("{{deadlineDate}}", &format_roc(deadline))
    };

    Some(RenderedEmail {
        subject: substitute(&templates.subject),
        body: substitute(&templates.body),
    })
}
