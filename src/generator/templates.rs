//! The fixed template catalog and its render function.
//!
//! Each template is a tera source string rendered against the serialized
//! [`TemplateContext`]. Template bodies are React Native + Solana
//! boilerplate; they deliberately avoid double-brace JSX constructs so the
//! sources stay valid tera input.

use serde::Serialize;

use crate::{error::AuthmigrateError, generator::context::TemplateContext};

/// The known template names, as they appear in `generate_template` action
/// payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateName {
    Polyfills,
    WalletProvider,
    UseAuthHook,
    SignInScreen,
    WalletConnectButton,
}

impl TemplateName {
    pub const ALL: &'static [TemplateName] = &[
        TemplateName::Polyfills,
        TemplateName::WalletProvider,
        TemplateName::UseAuthHook,
        TemplateName::SignInScreen,
        TemplateName::WalletConnectButton,
    ];

    /// Resolve an action payload to a template, `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "polyfills" => Some(Self::Polyfills),
            "wallet_provider" => Some(Self::WalletProvider),
            "use_auth_hook" => Some(Self::UseAuthHook),
            "sign_in_screen" => Some(Self::SignInScreen),
            "wallet_connect_button" => Some(Self::WalletConnectButton),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polyfills => "polyfills",
            Self::WalletProvider => "wallet_provider",
            Self::UseAuthHook => "use_auth_hook",
            Self::SignInScreen => "sign_in_screen",
            Self::WalletConnectButton => "wallet_connect_button",
        }
    }

    /// Output file name. Polyfills always emit `.js` regardless of the
    /// TypeScript setting; everything else honors the component extension.
    pub fn file_name(&self, context: &TemplateContext) -> String {
        match self {
            Self::Polyfills => "polyfills.js".to_string(),
            Self::WalletProvider => {
                format!("WalletProvider.{}", context.component_extension())
            }
            Self::UseAuthHook => {
                format!("useAuth.{}", context.component_extension())
            }
            Self::SignInScreen => {
                format!("SignInScreen.{}", context.component_extension())
            }
            Self::WalletConnectButton => {
                format!("WalletConnectButton.{}", context.component_extension())
            }
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Self::Polyfills => POLYFILLS,
            Self::WalletProvider => WALLET_PROVIDER,
            Self::UseAuthHook => USE_AUTH_HOOK,
            Self::SignInScreen => SIGN_IN_SCREEN,
            Self::WalletConnectButton => WALLET_CONNECT_BUTTON,
        }
    }
}

/// Render one template against the project context.
pub fn render(
    name: TemplateName,
    context: &TemplateContext,
) -> Result<String, AuthmigrateError> {
    let tera_context = tera::Context::from_serialize(context)?;
    let rendered = tera::Tera::one_off(name.source(), &tera_context, false)?;
    Ok(rendered)
}

const POLYFILLS: &str = r#"// Generated by authmigrate on {{ generatedDate }}.
// Import this file before anything else in your app entry point.
import 'react-native-get-random-values';
import { Buffer } from 'buffer';

if (typeof global.Buffer === 'undefined') {
  global.Buffer = Buffer;
}
"#;

const WALLET_PROVIDER: &str = r#"// Generated by authmigrate on {{ generatedDate }} for {{ projectName }}.
// Wallet-based authentication context replacing Firebase email/password auth.
import React, { createContext, useCallback, useMemo, useState } from 'react';
import { Connection, PublicKey, clusterApiUrl } from '@solana/web3.js';
import { transact } from '@solana-mobile/mobile-wallet-adapter-protocol-web3js';

const APP_IDENTITY = {
  name: '{{ appName }}',
};

export const AuthContext = createContext(null);

export function WalletProvider({ children }) {
  const [publicKey, setPublicKey] = useState(null);
  const [authToken, setAuthToken] = useState(null);

  const connection = useMemo(
    () => new Connection(clusterApiUrl('{{ solanaCluster }}')),
    [],
  );

  const signIn = useCallback(async () => {
    await transact(async (wallet) => {
      const authorization = await wallet.authorize({
        cluster: '{{ solanaCluster }}',
        identity: APP_IDENTITY,
      });
      setAuthToken(authorization.auth_token);
      setPublicKey(new PublicKey(authorization.accounts[0].address));
    });
  }, []);

  const signOut = useCallback(async () => {
    if (authToken != null) {
      await transact(async (wallet) => {
        await wallet.deauthorize({ auth_token: authToken });
      });
    }
    setAuthToken(null);
    setPublicKey(null);
  }, [authToken]);

  const value = useMemo(
    () => ({
      connection,
      publicKey,
      signIn,
      signOut,
      isAuthenticated: publicKey != null,
    }),
    [connection, publicKey, signIn, signOut],
  );

  return <AuthContext.Provider value={value}>{children}</AuthContext.Provider>;
}
"#;

const USE_AUTH_HOOK: &str = r#"// Generated by authmigrate on {{ generatedDate }}.
import { useContext } from 'react';
import { AuthContext } from './WalletProvider';

export function useAuth() {
  const context = useContext(AuthContext);
  if (context == null) {
    throw new Error('useAuth must be used within a WalletProvider');
  }
  return context;
}
"#;

const SIGN_IN_SCREEN: &str = r#"// Generated by authmigrate on {{ generatedDate }}.
import React, { useState } from 'react';
import { ActivityIndicator, StyleSheet, Text, View } from 'react-native';
import { useAuth } from './useAuth';
import { WalletConnectButton } from './WalletConnectButton';

export function SignInScreen() {
  const { signIn } = useAuth();
  const [busy, setBusy] = useState(false);
  const [error, setError] = useState(null);

  const handlePress = async () => {
    setBusy(true);
    setError(null);
    try {
      await signIn();
    } catch (_err) {
      setError('Wallet connection was cancelled or failed.');
    } finally {
      setBusy(false);
    }
  };

  return (
    <View style={styles.container}>
      <Text style={styles.title}>{{ appName }}</Text>
      <Text style={styles.subtitle}>Sign in with your Solana wallet</Text>
      {busy ? (
        <ActivityIndicator />
      ) : (
        <WalletConnectButton onPress={handlePress} />
      )}
      {error != null ? <Text style={styles.error}>{error}</Text> : null}
    </View>
  );
}

const styles = StyleSheet.create({
  container: { flex: 1, alignItems: 'center', justifyContent: 'center', padding: 24 },
  title: { fontSize: 28, fontWeight: '700' },
  subtitle: { fontSize: 16, marginTop: 8, marginBottom: 32 },
  error: { color: '#c0392b', marginTop: 16 },
});
"#;

const WALLET_CONNECT_BUTTON: &str = r#"// Generated by authmigrate on {{ generatedDate }}.
import React from 'react';
import { Pressable, StyleSheet, Text } from 'react-native';

export function WalletConnectButton({ onPress }) {
  return (
    <Pressable
      style={styles.button}
      onPress={onPress}
      accessibilityLabel="Connect wallet"
    >
      <Text style={styles.label}>Connect Wallet</Text>
    </Pressable>
  );
}

const styles = StyleSheet.create({
  button: {
    backgroundColor: '#512da8',
    borderRadius: 8,
    paddingHorizontal: 24,
    paddingVertical: 12,
  },
  label: { color: '#ffffff', fontSize: 16, fontWeight: '600' },
});
"#;
