//! Bundled sample records, shown on first run and whenever storage cannot be read

use crate::models::{
    Contact, ContactCategory, Metric, PlanStatus, PlanTask, QuickLink, ReleasePlan, Track,
    TrackStatus, Trend,
};

use super::DashboardData;

/// The whole sample aggregate
pub fn sample_data() -> DashboardData {
    DashboardData {
        contacts: sample_contacts(),
        platform_contacts: sample_platform_contacts(),
        label_artists: sample_label_artists(),
        tracks: sample_tracks(),
        release_plans: sample_release_plans(),
        links: sample_links(),
        metrics: sample_metrics(),
    }
}

#[allow(clippy::too_many_arguments)]
fn contact(
    id: &str,
    name: &str,
    category: ContactCategory,
    platform: &str,
    handle: &str,
    reach: &str,
    contact_url: &str,
    notes: &str,
    tags: &[&str],
    pitching_url: Option<&str>,
) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        category,
        platform: platform.to_string(),
        handle: handle.to_string(),
        reach: reach.to_string(),
        notes: notes.to_string(),
        contact_url: contact_url.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        pitching_url: pitching_url.map(str::to_string),
    }
}

fn sample_contacts() -> Vec<Contact> {
    vec![
        contact(
            "1",
            "Алексей Ривера",
            ContactCategory::Blogger,
            "Instagram",
            "@arivera_travel",
            "250k",
            "https://instagram.com/arivera_travel",
            "Тревел и лайфстайл. Высокая вовлеченность.",
            &["Путешествия", "Люкс"],
            None,
        ),
        contact(
            "2",
            "Луна Рэй",
            ContactCategory::Artist,
            "Telegram",
            "lunaray_official",
            "1.2M ежемесячно",
            "https://t.me/lunaray_official",
            "Восходящая звезда инди-попа. Открыта к коллаборациям.",
            &["Музыка", "Инди"],
            None,
        ),
    ]
}

fn sample_platform_contacts() -> Vec<Contact> {
    vec![
        contact(
            "pc-1",
            "Spotify for Artists",
            ContactCategory::PlatformCurator,
            "Spotify",
            "Editorial",
            "Весь мир",
            "https://artists.spotify.com/",
            "Прямой питчинг через дашборд Spotify for Artists.",
            &["Глобальный", "Приоритет"],
            Some("https://artists.spotify.com/c/pitch"),
        ),
        contact(
            "pc-3",
            "Яндекс Музыка",
            ContactCategory::PlatformCurator,
            "Yandex Music",
            "Редакция",
            "СНГ / Мир",
            "https://music.yandex.ru/artists",
            "Подача заявок в плейлисты и программу \"Искра\".",
            &["Мажор", "СНГ"],
            Some("https://yandex.ru/support/music/performers/pitching.html"),
        ),
    ]
}

fn sample_label_artists() -> Vec<Contact> {
    vec![contact(
        "la-1",
        "Shadow Echo",
        ContactCategory::LabelArtist,
        "Universal",
        "@shadow_echo",
        "800k",
        "https://t.me/shadow_echo_mgmt",
        "Техно-проект. Контракт до 2026 года.",
        &["Techno", "Mainstage"],
        None,
    )]
}

fn sample_tracks() -> Vec<Track> {
    let track = |id: &str, title: &str, artist: &str, status: TrackStatus, date: &str, genre: &str, isrc: &str| {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artist_name: artist.to_string(),
            status,
            release_date: date.to_string(),
            isrc: Some(isrc.to_string()),
            upc: None,
            genre: Some(genre.to_string()),
            mood: None,
            asset_link: None,
        }
    };

    vec![
        track(
            "t1",
            "Midnight Drive",
            "Shadow Echo",
            TrackStatus::Released,
            "2024-05-20",
            "Techno",
            "RU-A12-24-00001",
        ),
        track(
            "t2",
            "Summer Breeze",
            "Mira Vane",
            TrackStatus::InProgress,
            "2024-08-15",
            "Pop",
            "RU-A12-24-00002",
        ),
    ]
}

fn sample_release_plans() -> Vec<ReleasePlan> {
    let task = |id: &str, label: &str, completed: bool| PlanTask {
        id: id.to_string(),
        label: label.to_string(),
        completed,
    };

    vec![ReleasePlan {
        id: "rp1".to_string(),
        title: "Neon Nights (LP)".to_string(),
        artist: "Shadow Echo".to_string(),
        date: "2025-04-12".to_string(),
        status: PlanStatus::Pitching,
        tasks: vec![
            task("tsk1", "Финальная обложка готова", true),
            task("tsk2", "Питчинг в Spotify отправлен", true),
            task("tsk3", "Пресс-кит разослан блогерам", false),
            task("tsk4", "ТикТок сниппет опубликован", false),
        ],
        budget: None,
    }]
}

fn sample_metrics() -> Vec<Metric> {
    let metric = |id: &str, label: &str, value: &str, trend: Trend, delta: &str, icon: &str, color: &str| {
        Metric {
            id: id.to_string(),
            label: label.to_string(),
            value: value.to_string(),
            trend,
            trend_value: delta.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    };

    vec![
        metric("m1", "Слушатели в Spotify", "1.24M", Trend::Up, "+12%", "fa-spotify", "text-emerald-500"),
        metric("m2", "Сохранения треков", "450K", Trend::Up, "+5%", "fa-heart", "text-rose-500"),
        metric("m3", "Engagement Rate IG", "4.8%", Trend::Down, "-0.2%", "fa-instagram", "text-pink-500"),
        metric("m4", "Просмотры в TikTok", "2.1M", Trend::Up, "+28%", "fa-tiktok", "text-slate-800"),
    ]
}

fn sample_links() -> Vec<QuickLink> {
    let link = |id: &str, title: &str, url: &str, icon: &str, color: &str| QuickLink {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    };

    vec![
        link("1", "Пресс-кит (EPK)", "https://google.com", "fa-briefcase", "bg-indigo-500"),
        link("2", "Медиа-план", "https://notion.so", "fa-calendar-check", "bg-emerald-500"),
        link("3", "Аналитика", "https://analytics.google.com", "fa-chart-line", "bg-blue-500"),
    ]
}
