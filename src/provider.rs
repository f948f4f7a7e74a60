//! Social sign-in provider catalog and scope merging.

// std
use std::collections::BTreeSet;
// self
use crate::_prelude::*;

/// OAuth providers the remote service can build authorization URLs for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
	/// Login with Amazon.
	Amazon,
	/// Facebook Login.
	Facebook,
	/// GitHub OAuth.
	GitHub,
	/// Google Sign-In.
	Google,
	/// Instagram Basic Display.
	Instagram,
	/// LinkedIn Sign In.
	LinkedIn,
	/// Microsoft identity platform.
	Microsoft,
	/// Reddit OAuth.
	Reddit,
	/// TikTok Login Kit.
	TikTok,
	/// Twitch OAuth.
	Twitch,
	/// X (Twitter) OAuth 2.0.
	Twitter,
}
impl OAuthProvider {
	/// Returns the wire identifier the service expects.
	pub const fn as_str(self) -> &'static str {
		match self {
			OAuthProvider::Amazon => "amazon",
			OAuthProvider::Facebook => "facebook",
			OAuthProvider::GitHub => "github",
			OAuthProvider::Google => "google",
			OAuthProvider::Instagram => "instagram",
			OAuthProvider::LinkedIn => "linkedin",
			OAuthProvider::Microsoft => "microsoft",
			OAuthProvider::Reddit => "reddit",
			OAuthProvider::TikTok => "tiktok",
			OAuthProvider::Twitch => "twitch",
			OAuthProvider::Twitter => "twitter",
		}
	}

	/// Scopes the service requires for this provider regardless of what the
	/// caller asks for; sign-in breaks without them.
	pub const fn required_scopes(self) -> &'static [&'static str] {
		match self {
			OAuthProvider::Amazon => &["profile", "profile:user_id"],
			OAuthProvider::Facebook => &["email", "public_profile"],
			OAuthProvider::GitHub => &["public_repo", "user:email"],
			OAuthProvider::Google => &["email", "profile", "openid"],
			OAuthProvider::Instagram => &["user_profile", "user_media"],
			OAuthProvider::LinkedIn => &["profile", "email", "openid"],
			OAuthProvider::Microsoft => &["User.Read", "email", "profile", "openid"],
			OAuthProvider::Reddit => &["identity", "read"],
			OAuthProvider::TikTok => &["user.info.basic"],
			OAuthProvider::Twitch => &["user:read:email"],
			OAuthProvider::Twitter => &["tweet.read", "users.read", "offline.access"],
		}
	}
}
impl Display for OAuthProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Merges caller-supplied scopes with the provider's required set.
///
/// The result is deduplicated and sorted so the outgoing request stays stable
/// across runs; the service treats the list as an unordered set.
pub fn merge_scopes<I, S>(provider: OAuthProvider, caller_scopes: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let mut set: BTreeSet<String> = caller_scopes.into_iter().map(Into::into).collect();

	set.extend(provider.required_scopes().iter().map(|s| (*s).to_owned()));

	set.into_iter().collect()
}
