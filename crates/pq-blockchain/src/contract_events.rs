use alloy::{
    primitives::{Address, B256},
    rpc::types::Log,
    sol_types::{SolEvent, SolEventInterface},
};

use crate::contracts::PhotoQuest;

/// Decoded quest contract event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractEvent {
    QuestCreated(PhotoQuest::QuestCreated),
    PhotoSubmitted(PhotoQuest::PhotoSubmitted),
    SubmissionsSelected(PhotoQuest::SubmissionsSelected),
    QuestCompleted(PhotoQuest::QuestCompleted),
    QuestCancelled(PhotoQuest::QuestCancelled),
    PlatformFeeUpdated(PhotoQuest::PlatformFeeUpdated),
}

impl ContractEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ContractEvent::QuestCreated(_) => "QuestCreated",
            ContractEvent::PhotoSubmitted(_) => "PhotoSubmitted",
            ContractEvent::SubmissionsSelected(_) => "SubmissionsSelected",
            ContractEvent::QuestCompleted(_) => "QuestCompleted",
            ContractEvent::QuestCancelled(_) => "QuestCancelled",
            ContractEvent::PlatformFeeUpdated(_) => "PlatformFeeUpdated",
        }
    }
}

/// Position of a mined log. Pending logs carry no position and are never indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogMeta {
    pub contract_address: Address,
    pub transaction_hash: B256,
    pub transaction_index: u64,
    pub log_index: u64,
    pub block_number: u64,
    /// Not every node fills this in; the chain client backfills it from the block header.
    pub block_timestamp: Option<u64>,
}

impl LogMeta {
    pub fn from_log(log: &Log) -> Option<Self> {
        Some(Self {
            contract_address: log.address(),
            transaction_hash: log.transaction_hash?,
            transaction_index: log.transaction_index.unwrap_or_default(),
            log_index: log.log_index?,
            block_number: log.block_number?,
            block_timestamp: log.block_timestamp,
        })
    }

    /// Ordering key: block, then transaction, then log.
    pub fn position(&self) -> (u64, u64, u64) {
        (self.block_number, self.transaction_index, self.log_index)
    }
}

/// A decoded event together with where it was mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractLog {
    pub event: ContractEvent,
    pub meta: LogMeta,
}

fn decode_event<E: SolEventInterface>(log: &Log) -> Option<E> {
    E::decode_log(log.as_ref()).ok().map(|decoded| decoded.data)
}

/// Topic0 of every event the indexer follows.
pub fn monitored_contract_events() -> Vec<B256> {
    vec![
        PhotoQuest::QuestCreated::SIGNATURE_HASH,
        PhotoQuest::PhotoSubmitted::SIGNATURE_HASH,
        PhotoQuest::SubmissionsSelected::SIGNATURE_HASH,
        PhotoQuest::QuestCompleted::SIGNATURE_HASH,
        PhotoQuest::QuestCancelled::SIGNATURE_HASH,
        PhotoQuest::PlatformFeeUpdated::SIGNATURE_HASH,
    ]
}

pub fn decode_contract_event(log: &Log) -> Option<ContractEvent> {
    use PhotoQuest::PhotoQuestEvents as Events;

    decode_event::<Events>(log).map(|event| match event {
        Events::QuestCreated(e) => ContractEvent::QuestCreated(e),
        Events::PhotoSubmitted(e) => ContractEvent::PhotoSubmitted(e),
        Events::SubmissionsSelected(e) => ContractEvent::SubmissionsSelected(e),
        Events::QuestCompleted(e) => ContractEvent::QuestCompleted(e),
        Events::QuestCancelled(e) => ContractEvent::QuestCancelled(e),
        Events::PlatformFeeUpdated(e) => ContractEvent::PlatformFeeUpdated(e),
    })
}

/// Decodes a raw log into a positioned event. `None` for pending or foreign logs.
pub fn decode_contract_log(log: &Log) -> Option<ContractLog> {
    let meta = LogMeta::from_log(log)?;
    let event = decode_contract_event(log)?;
    Some(ContractLog { event, meta })
}


#[cfg(test)]
mod tests {
    use alloy::primitives::U256;

    use super::{test_support::mined_log, *};

    fn quest_created() -> PhotoQuest::QuestCreated {
        PhotoQuest::QuestCreated {
            questId: U256::from(7),
            requester: Address::repeat_byte(0xaa),
            title: "Golden hour".to_string(),
            category: 1,
            reward: U256::from(500_000_000_000_000_000u64),
            deadline: U256::from(1_900_000_000u64),
            maxSubmissions: U256::from(2),
        }
    }

    #[test]
    fn decodes_mined_quest_created_log() {
        let event = quest_created();
        let log = mined_log(&event, B256::repeat_byte(1), 3, 100);

        let decoded = decode_contract_log(&log).unwrap();
        assert_eq!(decoded.event, ContractEvent::QuestCreated(event));
        assert_eq!(decoded.meta.position(), (100, 0, 3));
        assert_eq!(decoded.meta.block_timestamp, None);
        assert_eq!(decoded.event.kind(), "QuestCreated");
    }

    #[test]
    fn pending_log_is_skipped() {
        let mut log = mined_log(&quest_created(), B256::repeat_byte(1), 0, 1);
        log.block_number = None;
        assert!(decode_contract_log(&log).is_none());
    }

    #[test]
    fn every_monitored_signature_is_distinct() {
        let mut signatures = monitored_contract_events();
        signatures.sort();
        signatures.dedup();
        assert_eq!(signatures.len(), 6);
    }

    #[test]
    fn decodes_selected_photographers_in_order() {
        let event = PhotoQuest::SubmissionsSelected {
            questId: U256::from(1),
            requester: Address::repeat_byte(0xaa),
            selectedPhotographers: vec![Address::repeat_byte(2), Address::repeat_byte(1)],
            rewardPerWinner: U256::from(250),
            timestamp: U256::from(1_000),
        };
        let log = mined_log(&event, B256::repeat_byte(9), 0, 5);

        match decode_contract_event(&log) {
            Some(ContractEvent::SubmissionsSelected(decoded)) => {
                assert_eq!(decoded.selectedPhotographers, event.selectedPhotographers);
            }
            other => panic!("unexpected decode result: {other:?}"),
        }
    }
}
