mod role_layout;
pub use role_layout::{AdminLayout, KabidLayout, SekretarisLayout, StaffLayout};

mod login;
pub use login::{Login, NotFound, Unauthorized};

mod admin;
pub use admin::{
    AdminAcara, AdminDashboard, AdminNotifikasi, AdminSurat, AdminSuratBaru, AdminSuratKeluar,
    AdminTamu, AdminUsers,
};

mod reader;
pub use reader::{
    KabidDashboard, KabidNotifikasi, KabidSurat, SekretarisDashboard, SekretarisNotifikasi,
    SekretarisSurat, StaffDashboard, StaffNotifikasi, StaffSurat,
};
