//! Transaction messages.

use alloy_primitives::Bytes;
use levy_primitives::{Address, Coins};
use serde::{Deserialize, Serialize};

use crate::UnwrapError;

/// Type URL of a contract execution message.
pub const MSG_EXECUTE_CONTRACT: &str = "/cosmwasm.wasm.v1.MsgExecuteContract";

/// Type URL of a bank send message.
pub const MSG_SEND: &str = "/cosmos.bank.v1beta1.MsgSend";

/// Type URL of an authorization exec message.
pub const MSG_EXEC: &str = "/cosmos.authz.v1beta1.MsgExec";

/// Messages the fee pipeline reasons about.
///
/// Anything the pipeline does not inspect is carried as [`Msg::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Msg {
    /// Smart-contract call.
    ExecuteContract {
        /// Calling account.
        sender: Address,
        /// Target contract.
        contract: Address,
        /// Encoded call payload.
        msg: Bytes,
        /// Funds attached to the call.
        funds: Coins,
    },
    /// Token transfer.
    Send {
        /// Sending account.
        from: Address,
        /// Receiving account.
        to: Address,
        /// Transferred amount.
        amount: Coins,
    },
    /// Messages executed by `grantee` under authorizations.
    Exec {
        /// Account exercising the authorizations.
        grantee: Address,
        /// Wrapped messages.
        msgs: Vec<Msg>,
    },
    /// Any other message.
    Other {
        /// Message type URL.
        type_url: String,
        /// Signing account.
        signer: Address,
    },
}

impl Msg {
    /// Builds a contract call without payload or funds.
    pub fn execute_contract(sender: Address, contract: Address) -> Self {
        Self::ExecuteContract { sender, contract, msg: Bytes::new(), funds: Coins::empty() }
    }

    /// Type URL identifying the message.
    pub fn type_url(&self) -> &str {
        match self {
            Self::ExecuteContract { .. } => MSG_EXECUTE_CONTRACT,
            Self::Send { .. } => MSG_SEND,
            Self::Exec { .. } => MSG_EXEC,
            Self::Other { type_url, .. } => type_url,
        }
    }

    /// Account that must sign the message.
    pub const fn signer(&self) -> Address {
        match self {
            Self::ExecuteContract { sender, .. } => *sender,
            Self::Send { from, .. } => *from,
            Self::Exec { grantee, .. } => *grantee,
            Self::Other { signer, .. } => *signer,
        }
    }

    /// True for a direct contract call.
    pub const fn is_contract_execution(&self) -> bool {
        matches!(self, Self::ExecuteContract { .. })
    }

    /// Target contract of a direct contract call.
    pub const fn contract(&self) -> Option<Address> {
        match self {
            Self::ExecuteContract { contract, .. } => Some(*contract),
            _ => None,
        }
    }

    /// Messages wrapped one level down, empty for non-wrapping messages.
    pub fn unwrap_msgs(&self) -> &[Self] {
        match self {
            Self::Exec { msgs, .. } => msgs,
            _ => &[],
        }
    }
}

/// Replaces every authorization exec with the messages it wraps, recursively.
///
/// Fails when more than `max_depth` exec layers are nested.
pub fn flatten_msgs(msgs: &[Msg], max_depth: usize) -> Result<Vec<&Msg>, UnwrapError> {
    fn walk<'m>(
        msgs: &'m [Msg],
        depth: usize,
        max_depth: usize,
        out: &mut Vec<&'m Msg>,
    ) -> Result<(), UnwrapError> {
        for msg in msgs {
            if let Msg::Exec { msgs: inner, .. } = msg {
                if depth >= max_depth {
                    return Err(UnwrapError { max_depth });
                }
                walk(inner, depth + 1, max_depth, out)?;
            } else {
                out.push(msg);
            }
        }
        Ok(())
    }

    let mut out = Vec::with_capacity(msgs.len());
    walk(msgs, 0, max_depth, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use levy_primitives::address;

    use super::*;

    const ALICE: Address = address!("0x00000000000000000000000000000000000a11ce");
    const CONTRACT: Address = address!("0x000000000000000000000000000000000000c0de");

    fn nested(depth: usize) -> Msg {
        let mut msg = Msg::execute_contract(ALICE, CONTRACT);
        for _ in 0..depth {
            msg = Msg::Exec { grantee: ALICE, msgs: vec![msg] };
        }
        msg
    }

    #[test]
    fn capability_checks() {
        let call = Msg::execute_contract(ALICE, CONTRACT);
        assert!(call.is_contract_execution());
        assert_eq!(call.contract(), Some(CONTRACT));
        assert_eq!(call.type_url(), MSG_EXECUTE_CONTRACT);
        assert!(call.unwrap_msgs().is_empty());

        let exec = nested(1);
        assert!(!exec.is_contract_execution());
        assert_eq!(exec.contract(), None);
        assert_eq!(exec.unwrap_msgs().len(), 1);
    }

    #[test]
    fn flatten_within_depth() {
        let msgs = vec![nested(3), Msg::Other { type_url: "/x".into(), signer: ALICE }];
        let flat = flatten_msgs(&msgs, 5).unwrap();
        assert_eq!(flat.len(), 2);
        assert!(flat[0].is_contract_execution());
        assert_eq!(flat[1].type_url(), "/x");
    }

    #[test]
    fn flatten_at_exact_depth() {
        assert!(flatten_msgs(&[nested(5)], 5).is_ok());
    }

    #[test]
    fn flatten_rejects_excess_depth() {
        assert_eq!(flatten_msgs(&[nested(6)], 5), Err(UnwrapError { max_depth: 5 }));
    }

    #[test]
    fn serde_tags_variants() {
        let json = serde_json::to_value(Msg::execute_contract(ALICE, CONTRACT)).unwrap();
        assert_eq!(json["type"], "execute_contract");
    }
}
