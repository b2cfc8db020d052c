pub mod user_service;

pub use user_service::{
    LoginRequest, LoginResponse, UpdatePasswordRequest, UserProfile, UserRecord, UserService, UserStore,
};
