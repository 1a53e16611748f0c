//! User-facing messages. The console is Arabic-only.

pub const SERVER_ERROR: &str = "حدث خطأ ما بالسيرفر";
pub const LOGIN_REQUIRED: &str = "الرجاء تسجيل الدخول أولاً";

// -- Settings --

pub const FULLNAME_TOO_SHORT: &str = "الاسم يجب أن يكون أكثر من 6 أحرف";
pub const EMAIL_PROVIDER: &str = "البريد الإلكتروني يجب أن يكون جيميل أو ياهو";
pub const INFO_UPDATED: &str = "تم تعديل البيانات بنجاح";
pub const ACCOUNT_EXISTS: &str = "هذا الحساب موجود مُسبقًا";
pub const PASSWORD_TOO_SHORT: &str = "كلمة المرور يجب أن تكون أكثر من 6 أحرف";
pub const PASSWORDS_MISMATCH: &str = "كلمتا المرور غير متطابقين";
pub const PASSWORD_CHANGED: &str = "تم تغيير كلمة السر بنجاح";
pub const ACCOUNT_DELETED: &str = "تم حذف الحساب بشكل ناجح";

// -- Residents --

pub const INVALID_RESIDENT_ID: &str = "رقم الطلب هذا غير صالح";
pub const RESIDENT_NOT_FOUND: &str = "هذا الطلب غير موجود";
