mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod delete_dialog;
pub use delete_dialog::DeleteConfirmDialog;

mod list_chrome;
pub use list_chrome::{ListToolbar, LoadError, PaginationBar};

mod login;
pub use login::LoginView;

mod dashboard;
pub use dashboard::DashboardView;

mod surat_list;
pub use surat_list::SuratListView;

mod surat_wizard;
pub use surat_wizard::SuratWizardView;

mod surat_keluar;
pub use surat_keluar::SuratKeluarView;

mod users;
pub use users::UsersView;

mod acara;
pub use acara::AcaraView;

mod tamu;
pub use tamu::TamuView;

mod notifications;
pub use notifications::NotificationsView;
