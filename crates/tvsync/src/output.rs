//! Output formatting: entity tables and colored status lines.

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use tvsync_core::{Contact, Device, Group};

// ── Status lines ─────────────────────────────────────────────────────

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn warning(message: &str) {
    println!("{}", message.yellow());
}

pub fn error(message: &str) {
    eprintln!("{}", message.red());
}

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Remote Control ID")]
    remote_control_id: String,
    #[tabled(rename = "Group")]
    group_id: String,
    #[tabled(rename = "Alias")]
    alias: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Features")]
    features: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.clone(),
            remote_control_id: d.remote_control_id.clone(),
            group_id: d.group_id.clone(),
            alias: d.alias.clone().unwrap_or_default(),
            state: format!("{:?}", d.online_state),
            features: d.supported_features.to_string(),
        }
    }
}

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Group")]
    group_id: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&Contact> for ContactRow {
    fn from(c: &Contact) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            group_id: c.group_id.clone(),
            state: format!("{:?}", c.online_state),
        }
    }
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Permissions")]
    permissions: String,
    #[tabled(rename = "Shares")]
    shares: usize,
}

impl From<&Group> for GroupRow {
    fn from(g: &Group) -> Self {
        Self {
            id: g.id.clone(),
            name: g.name.clone(),
            owner: g
                .owner
                .as_ref()
                .map_or_else(|| "(me)".into(), |o| o.name.clone()),
            permissions: format!("{:?}", g.permissions),
            shares: g.shared_with.len(),
        }
    }
}

// ── Renderers ────────────────────────────────────────────────────────

fn render<R: Tabled>(rows: Vec<R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn device_table(devices: &[Device]) -> String {
    render(devices.iter().map(DeviceRow::from).collect())
}

pub fn contact_table(contacts: &[Contact]) -> String {
    render(contacts.iter().map(ContactRow::from).collect())
}

pub fn group_table(groups: &[Group]) -> String {
    render(groups.iter().map(GroupRow::from).collect())
}
