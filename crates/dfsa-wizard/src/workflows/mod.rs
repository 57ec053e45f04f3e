pub mod fs_application;
