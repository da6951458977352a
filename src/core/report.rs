use crate::core::classifier::Classifier;
use crate::core::sanitizer::{highlight_keywords, trim, TrimStrategy};
use crate::domain::model::{BlogPost, DateRange, Item};
use chrono::NaiveDate;

pub const UNCLASSIFIED: &str = "未分類";
pub const TOP_SERVICES: usize = 10;

/// Section order of the report, with the icon shown next to each category.
pub const CATEGORY_DISPLAY: &[(&str, &str)] = &[
    ("コンピュート系", "💻"),
    ("コンテナ系", "🐳"),
    ("ネットワーク系", "🌐"),
    ("DBストレージ系", "💾"),
    ("アプリケーション統合", "🔄"),
    ("開発環境", "👨‍💻"),
    ("運用管理", "🔧"),
    ("セキュリティ", "🔒"),
    ("データ処理・管理・分析", "📊"),
    ("AI/ML", "🤖"),
    ("コンタクトセンター", "📞"),
    ("IoT", "📱"),
    ("メディア", "🎬"),
    ("請求系", "💰"),
    ("移転と転送系", "🚚"),
    ("その他", "📦"),
];

pub fn icon_for(category: &str) -> Option<&'static str> {
    CATEGORY_DISPLAY
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, icon)| *icon)
}

fn anchor(category: &str) -> String {
    category.replace(' ', "-").replace('/', "").to_lowercase()
}

#[derive(Debug, Clone)]
pub struct ServiceGroup {
    pub service: String,
    pub description: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone)]
pub struct CategorySection {
    pub category: String,
    pub icon: Option<&'static str>,
    pub services: Vec<ServiceGroup>,
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub sections: Vec<CategorySection>,
    /// Items per matched service, in first-seen order.
    pub service_counts: Vec<(String, usize)>,
}

impl Report {
    /// Groups classified items into display-ordered categories and services.
    pub fn assemble(items: Vec<Item>, classifier: &Classifier) -> Self {
        let mut by_category: Vec<(String, Vec<Item>)> = Vec::new();
        let mut service_counts: Vec<(String, usize)> = Vec::new();

        for item in items {
            if let Some(service) = &item.service {
                match service_counts.iter_mut().find(|(name, _)| name == service) {
                    Some((_, count)) => *count += 1,
                    None => service_counts.push((service.clone(), 1)),
                }
            }
            match by_category.iter_mut().find(|(cat, _)| *cat == item.category) {
                Some((_, bucket)) => bucket.push(item),
                None => by_category.push((item.category.clone(), vec![item])),
            }
        }

        // Fixed display order first, then categories the order table does not know.
        let mut ordered: Vec<(String, Vec<Item>)> = Vec::with_capacity(by_category.len());
        for (name, _) in CATEGORY_DISPLAY {
            if let Some(pos) = by_category.iter().position(|(cat, _)| cat == name) {
                ordered.push(by_category.remove(pos));
            }
        }
        ordered.extend(by_category);

        let sections = ordered
            .into_iter()
            .map(|(category, items)| CategorySection {
                icon: icon_for(&category),
                services: group_by_service(items, classifier),
                category,
            })
            .collect();

        Self {
            sections,
            service_counts,
        }
    }

    pub fn total(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| &section.services)
            .map(|group| group.items.len())
            .sum()
    }

    /// Busiest services, count descending; ties keep first-seen order.
    pub fn top_services(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .service_counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(limit);
        counts
    }

    /// Items in rendering order.
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.services.iter_mut())
            .flat_map(|group| group.items.iter_mut())
    }
}

fn group_by_service(items: Vec<Item>, classifier: &Classifier) -> Vec<ServiceGroup> {
    let mut groups: Vec<ServiceGroup> = Vec::new();
    for item in items {
        let service = item.service.as_deref().unwrap_or(UNCLASSIFIED);
        match groups.iter_mut().find(|group| group.service == service) {
            Some(group) => group.items.push(item),
            None => groups.push(ServiceGroup {
                service: service.to_string(),
                description: classifier.describe(service).to_string(),
                items: vec![item],
            }),
        }
    }
    groups
}

/// Renders the service-update digest.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    pub title: String,
    pub intro: String,
    pub summary_limit: usize,
    pub generated_on: NaiveDate,
}

impl ReportBuilder {
    pub fn new(intro: impl Into<String>, summary_limit: usize, generated_on: NaiveDate) -> Self {
        Self {
            title: "AWS 更新情報".to_string(),
            intro: intro.into(),
            summary_limit,
            generated_on,
        }
    }

    pub fn build(&self, report: &Report, range: &DateRange) -> String {
        let mut md = String::new();

        push_line(&mut md, format!("# {} ({} ～ {})\n", self.title, range.start, range.end));
        push_line(&mut md, format!("{}\n", self.intro));
        md.push_str(&self.table_of_contents(report));

        for section in &report.sections {
            let heading = match section.icon {
                Some(icon) => format!("## {} {}\n", icon, section.category),
                None => format!("## {}\n", section.category),
            };
            push_line(&mut md, heading);

            for group in &section.services {
                let heading = if group.description.is_empty() {
                    format!("### {}\n", group.service)
                } else {
                    format!("### {} - {}\n", group.service, group.description)
                };
                push_line(&mut md, heading);

                for item in &group.items {
                    self.render_item(&mut md, item);
                }
            }
        }

        self.statistics(&mut md, report);

        push_line(&mut md, "\n---");
        push_line(
            &mut md,
            format!(
                "*このレポートは {} に自動生成されました*",
                self.generated_on.format("%Y-%m-%d")
            ),
        );
        md
    }

    /// Numbered by position among present categories; only iconed ones get a line.
    pub fn table_of_contents(&self, report: &Report) -> String {
        let mut toc = String::from("## 目次\n\n");
        for (i, section) in report.sections.iter().enumerate() {
            if let Some(icon) = section.icon {
                push_line(
                    &mut toc,
                    format!(
                        "{}. [{} {}](#{})",
                        i + 1,
                        icon,
                        section.category,
                        anchor(&section.category)
                    ),
                );
            }
        }
        toc.push('\n');
        toc
    }

    fn render_item(&self, md: &mut String, item: &Item) {
        let marker = if item.important { "🔥 " } else { "" };
        let title = highlight_keywords(item.display_title());
        let summary = highlight_keywords(&trim(
            item.display_summary(),
            self.summary_limit,
            TrimStrategy::SentenceAware,
        ));

        push_line(md, format!("#### {}{}", marker, title));
        push_entry_details(md, item.published, &item.link, &summary);
    }

    fn statistics(&self, md: &mut String, report: &Report) {
        push_line(md, "## 📊 統計情報\n");
        push_line(md, format!("- **合計**: {} 件のアップデート", report.total()));

        let top = report.top_services(TOP_SERVICES);
        if !top.is_empty() {
            push_line(md, "- **サービス別更新数**:");
            for (service, count) in top {
                push_line(md, format!("  - {}: {} 件", service, count));
            }
        }
    }
}

fn push_line(md: &mut String, line: impl AsRef<str>) {
    md.push_str(line.as_ref());
    md.push('\n');
}

/// Date, link and summary lines followed by the entry separator.
fn push_entry_details(md: &mut String, published: NaiveDate, link: &str, summary: &str) {
    push_line(md, format!("- **日付**: {}", published.format("%Y-%m-%d")));
    push_line(md, format!("- **リンク**: [{}]({})", link, link));
    push_line(md, format!("- **概要**: {}\n", summary));
    push_line(md, "---\n");
}

/// Posts of one blog, newest first.
#[derive(Debug, Clone)]
pub struct BlogSection {
    pub name: String,
    pub posts: Vec<BlogPost>,
}

/// Renders the weekly blog digest.
#[derive(Debug, Clone)]
pub struct BlogReportBuilder {
    pub summary_limit: usize,
}

impl BlogReportBuilder {
    pub fn build(&self, sections: &[BlogSection], range: &DateRange) -> String {
        let mut md = format!(
            "# AWS ブログ記事まとめ ({} ～ {})\n\n",
            range.start, range.end
        );

        for section in sections.iter().filter(|s| !s.posts.is_empty()) {
            push_line(&mut md, format!("## {}\n", section.name));
            for post in &section.posts {
                let summary = trim(post.display_summary(), self.summary_limit, TrimStrategy::Hard);
                push_line(&mut md, format!("### {}", post.display_title()));
                push_entry_details(&mut md, post.published, &post.link, &summary);
            }
        }

        md
    }
}
