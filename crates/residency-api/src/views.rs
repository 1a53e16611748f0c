//! Server-rendered HTML. Every interpolated value goes through [`escape`].

use std::fmt::Write;

use chrono::{DateTime, Utc};
use residency_types::api::{Flash, FlashKind};
use residency_types::models::{Admin, Notification, Populated, Resident, User};
use serde_json::{Map, Value};

use crate::overview::Overview;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn format_date(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

fn user_name(user: Option<&User>) -> String {
    user.map(|u| escape(&u.fullname)).unwrap_or_else(|| "—".to_string())
}

pub fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let banner = match flash {
        Some(f) => {
            let class = match f.kind {
                FlashKind::Success => "alert alert-success",
                FlashKind::Error => "alert alert-danger",
            };
            format!(r#"<div class="{}" role="alert">{}</div>"#, class, escape(&f.message))
        }
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="ar" dir="rtl">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav>
<a href="/dashboard">الرئيسية</a>
<a href="/dashboard/accounts">الحسابات</a>
<a href="/dashboard/residents">طلبات الإقامة</a>
<a href="/dashboard/notifications/users">إشعارات المستخدمين</a>
<a href="/dashboard/notifications/residents">إشعارات الإقامة</a>
<a href="/dashboard/settings">الإعدادات</a>
</nav>
{banner}
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        banner = banner,
        body = body,
    )
}

pub fn overview(data: &Overview) -> String {
    let mut html = format!(
        r#"<section class="stats">
<div class="stat" data-stat="admins"><span>المشرفون</span><strong>{}</strong></div>
<div class="stat" data-stat="users"><span>المستخدمون</span><strong>{}</strong></div>
<div class="stat" data-stat="residents"><span>طلبات الإقامة</span><strong>{}</strong></div>
</section>
<table class="admins">
<thead><tr><th>الاسم</th><th>البريد الإلكتروني</th></tr></thead>
<tbody>
"#,
        data.admins_count(),
        data.users_count,
        data.residents_count,
    );
    for admin in &data.admins {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(&admin.fullname),
            escape(&admin.email)
        );
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn settings(admin: &Admin) -> String {
    format!(
        r#"<form method="post" action="/dashboard/settings/editInfo">
<label>الاسم <input name="fullname" value="{fullname}"></label>
<label>البريد الإلكتروني <input name="email" type="email" value="{email}"></label>
<button type="submit">حفظ</button>
</form>
<form method="post" action="/dashboard/settings/changePassword">
<label>كلمة المرور <input name="password" type="password"></label>
<label>تأكيد كلمة المرور <input name="confirmPassword" type="password"></label>
<button type="submit">تغيير</button>
</form>
<form method="post" action="/dashboard/settings/deleteAccount">
<button type="submit" class="danger">حذف الحساب</button>
</form>
"#,
        fullname = escape(&admin.fullname),
        email = escape(&admin.email),
    )
}

pub fn accounts(users: &[User]) -> String {
    let mut html = String::from(
        "<table class=\"accounts\">\n<thead><tr><th>الاسم</th><th>البريد الإلكتروني</th><th>الهاتف</th><th>تاريخ التسجيل</th></tr></thead>\n<tbody>\n",
    );
    for user in users {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&user.fullname),
            escape(&user.email),
            escape(user.phone.as_deref().unwrap_or("")),
            format_date(&user.created_at)
        );
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn residents(residents: &[Populated<Resident>]) -> String {
    let mut html = String::from(
        "<table class=\"residents\">\n<thead><tr><th>مقدم الطلب</th><th>تاريخ الطلب</th><th></th></tr></thead>\n<tbody>\n",
    );
    for entry in residents {
        let _ = writeln!(
            html,
            r#"<tr><td>{}</td><td>{}</td><td><a href="/dashboard/resident/{}">عرض</a></td></tr>"#,
            user_name(entry.user.as_ref()),
            format_date(&entry.record.date),
            entry.record.id
        );
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn notifications(entries: &[Populated<Notification>]) -> String {
    let mut html = String::from("<ul class=\"notifications\">\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "<li><strong>{}</strong> <time>{}</time>\n{}</li>",
            user_name(entry.user.as_ref()),
            format_date(&entry.record.date),
            fields(&entry.record.payload)
        );
    }
    html.push_str("</ul>\n");
    html
}

pub fn resident_detail(entry: &Populated<Resident>) -> String {
    let applicant = match &entry.user {
        Some(user) => format!(
            "<dl class=\"applicant\">\n<dt>الاسم</dt><dd>{}</dd>\n<dt>البريد الإلكتروني</dt><dd>{}</dd>\n<dt>الهاتف</dt><dd>{}</dd>\n</dl>\n",
            escape(&user.fullname),
            escape(&user.email),
            escape(user.phone.as_deref().unwrap_or(""))
        ),
        None => "<p class=\"applicant missing\">—</p>\n".to_string(),
    };

    format!(
        "<article class=\"resident\" data-id=\"{}\">\n<h2>طلب إقامة</h2>\n<time>{}</time>\n{}{}</article>\n",
        entry.record.id,
        format_date(&entry.record.date),
        applicant,
        fields(&entry.record.fields)
    )
}

pub fn login() -> String {
    "<h1>تسجيل الدخول</h1>\n".to_string()
}

/// Key/value list for a free-form JSON object.
fn fields(map: &Map<String, Value>) -> String {
    let mut html = String::from("<dl class=\"fields\">\n");
    for (key, value) in map {
        let shown = match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        let _ = writeln!(html, "<dt>{}</dt><dd>{}</dd>", escape(key), escape(&shown));
    }
    html.push_str("</dl>\n");
    html
}
