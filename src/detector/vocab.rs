//! Fixed detection vocabulary shared by the detector families.
//!
//! These allow-lists define the product's detection grammar. Changing them
//! changes which projects are considered migratable, so they live in one
//! place rather than inside individual detectors.

/// Feature name carried by every UAM auth record.
pub const AUTH_FEATURE: &str = "authentication";

/// Detected auth method for the Firebase email/password pattern.
pub const EMAIL_PASSWORD_METHOD: &str = "email_password";

/// Detected provider name.
pub const FIREBASE_PROVIDER: &str = "firebase";

/// JS/TS auth-provider packages. Matched exactly or as a `"<pkg>/"` prefix.
pub const JS_AUTH_PACKAGES: &[&str] = &[
    "firebase/auth",
    "firebase",
    "@firebase/auth",
    "@react-native-firebase/auth",
];

/// JS/TS provider function names recognized as auth calls.
pub const JS_AUTH_FUNCTIONS: &[&str] = &[
    "signInWithEmailAndPassword",
    "createUserWithEmailAndPassword",
    "sendPasswordResetEmail",
    "signOut",
    "onAuthStateChanged",
    "getAuth",
    "updateProfile",
];

/// The "create user" function; a call sets `has_registration`.
pub const CREATE_USER_FUNCTION: &str = "createUserWithEmailAndPassword";

/// The "send password reset" function; a call sets `has_password_reset`.
pub const PASSWORD_RESET_FUNCTION: &str = "sendPasswordResetEmail";

/// JSX tags inspected as potential auth form inputs.
pub const AUTH_INPUT_TAGS: &[&str] = &["TextInput", "Input"];

/// JSX tags inspected as potential auth form buttons.
pub const AUTH_BUTTON_TAGS: &[&str] = &["Button", "TouchableOpacity", "Pressable"];

/// JSX attributes whose string values are checked for auth hints.
pub const UI_ATTRIBUTES: &[&str] = &[
    "placeholder",
    "label",
    "title",
    "accessibilityLabel",
    "testID",
];

/// Substrings that mark an attribute value as auth-related.
pub const AUTH_HINTS: &[&str] = &[
    "email", "password", "login", "signin", "submit", "register", "signup",
];

/// True when `module` matches the package allow-list exactly or by
/// `"<pkg>/"` prefix (e.g. `firebase/auth/react-native`).
pub fn is_auth_package(module: &str) -> bool {
    JS_AUTH_PACKAGES.iter().any(|pkg| {
        module == *pkg || module.starts_with(&format!("{pkg}/"))
    })
}

/// True when `value` contains any auth hint, case-insensitively.
pub fn contains_auth_hint(value: &str) -> bool {
    let lowered = value.to_lowercase();
    AUTH_HINTS.iter().any(|hint| lowered.contains(hint))
}
